//! Reloop Event Log
//!
//! Append-only log of campaign events:
//! - every state change is an immutable event record
//! - streams are totally ordered by `(recorded_at, event_id)`
//! - corrections are ordinary events, folded in by readers
//!
//! The storage port has no update and no delete; immutability is
//! architectural rather than policed at runtime.

#![warn(clippy::all)]

pub mod append;
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod query;
pub mod store;
pub mod types;

pub use append::EventLog;
pub use memory::MemoryEventStore;
#[cfg(feature = "postgres")]
pub use postgres::PgEventStore;
pub use store::EventStore;
pub use types::{
    Actor, ActorType, CorrectionQuery, EventLogError, EventRecord, NewEvent, Result,
};
