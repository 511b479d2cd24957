//! Reloop Storage Layer
//!
//! Provides persistence for campaign projections.
//!
//! # Architecture
//!
//! - **Repository trait**: Defines the storage interface (port)
//! - **In-memory store**: Fast implementation for testing
//! - **PostgreSQL store**: Production implementation (feature `postgres`)
//!
//! Projections are derived state: every row can be deleted and rebuilt
//! from the event log, so the interface is upsert-only.
//!
//! # Usage
//!
//! ```rust
//! use reloop_store::{MemoryProjectionStore, ProjectionRepository};
//! use reloop_domain::{CampaignId, CampaignProjection};
//! use chrono::Utc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = MemoryProjectionStore::new();
//!
//!     // Save a projection
//!     let mut projection = CampaignProjection::new(CampaignId::new(), Utc::now());
//!     projection.reference_code = "LEGO-2024-001".to_string();
//!     projection.material = "rABS".to_string();
//!     store.upsert(&projection).await.unwrap();
//!
//!     // Read it back
//!     let found = store.find_by_id(&projection.campaign_id).await.unwrap();
//!     assert!(found.is_some());
//! }
//! ```

#![warn(clippy::all)]

// Modules
mod error;
mod memory;
#[cfg(feature = "postgres")]
mod postgres;
mod repository;

// Re-exports
pub use error::StoreError;
pub use memory::MemoryProjectionStore;
#[cfg(feature = "postgres")]
pub use postgres::PgProjectionStore;
pub use repository::ProjectionRepository;
