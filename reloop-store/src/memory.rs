//! In-memory projection store
//!
//! Used for testing and development without a database.
//! Thread-safe using RwLock for concurrent access.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use reloop_domain::{CampaignId, CampaignProjection, CampaignStatus};

use crate::error::StoreError;
use crate::repository::ProjectionRepository;

/// In-memory implementation of the projection repository.
pub struct MemoryProjectionStore {
    campaigns: RwLock<HashMap<CampaignId, CampaignProjection>>,
}

impl MemoryProjectionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            campaigns: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored projections (useful for test assertions).
    pub fn campaign_count(&self) -> usize {
        self.campaigns.read().unwrap().len()
    }

    /// Remove all projections (useful for test setup).
    pub fn clear(&self) {
        self.campaigns.write().unwrap().clear();
    }
}

impl Default for MemoryProjectionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_newest_first(campaigns: &mut [CampaignProjection]) {
    campaigns.sort_by(|a, b| (b.created_at, b.campaign_id).cmp(&(a.created_at, a.campaign_id)));
}

// =============================================================================
// ProjectionRepository implementation
// =============================================================================

#[async_trait]
impl ProjectionRepository for MemoryProjectionStore {
    async fn upsert(&self, projection: &CampaignProjection) -> Result<(), StoreError> {
        self.campaigns
            .write()
            .unwrap()
            .insert(projection.campaign_id, projection.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CampaignId,
    ) -> Result<Option<CampaignProjection>, StoreError> {
        Ok(self.campaigns.read().unwrap().get(id).cloned())
    }

    async fn find_by_reference(
        &self,
        reference_code: &str,
    ) -> Result<Option<CampaignProjection>, StoreError> {
        let campaigns = self.campaigns.read().unwrap();
        let mut matched: Vec<CampaignProjection> = campaigns
            .values()
            .filter(|p| p.reference_code == reference_code)
            .cloned()
            .collect();
        sort_newest_first(&mut matched);
        Ok(matched.into_iter().next())
    }

    async fn find_by_status(
        &self,
        status: CampaignStatus,
    ) -> Result<Vec<CampaignProjection>, StoreError> {
        let campaigns = self.campaigns.read().unwrap();
        let mut matched: Vec<CampaignProjection> = campaigns
            .values()
            .filter(|p| p.status == status)
            .cloned()
            .collect();
        sort_newest_first(&mut matched);
        Ok(matched)
    }

    async fn list(&self) -> Result<Vec<CampaignProjection>, StoreError> {
        let campaigns = self.campaigns.read().unwrap();
        let mut all: Vec<CampaignProjection> = campaigns.values().cloned().collect();
        sort_newest_first(&mut all);
        Ok(all)
    }
}
