//! Repository trait definitions (Ports)
//!
//! These traits define the storage interface for campaign projections.
//! Implementations can be PostgreSQL, in-memory, or mock for testing.
//!
//! Projections are a cache of the event log, never the source of truth.
//! Any row can be dropped and rebuilt from the stream, so the interface
//! is upsert-only with no delete.

use crate::error::StoreError;
use async_trait::async_trait;
use reloop_domain::{CampaignId, CampaignProjection, CampaignStatus};

/// Repository for campaign projections
#[async_trait]
pub trait ProjectionRepository: Send + Sync {
    /// Save a projection (insert or update)
    async fn upsert(&self, projection: &CampaignProjection) -> Result<(), StoreError>;

    /// Find a projection by campaign ID
    async fn find_by_id(
        &self,
        id: &CampaignId,
    ) -> Result<Option<CampaignProjection>, StoreError>;

    /// Find a projection by campaign reference code
    async fn find_by_reference(
        &self,
        reference_code: &str,
    ) -> Result<Option<CampaignProjection>, StoreError>;

    /// Find all projections in one pipeline status, newest campaign first
    async fn find_by_status(
        &self,
        status: CampaignStatus,
    ) -> Result<Vec<CampaignProjection>, StoreError>;

    /// List all projections, newest campaign first
    async fn list(&self) -> Result<Vec<CampaignProjection>, StoreError>;
}
