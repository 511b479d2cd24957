//! Test helpers for campaign pipeline tests.
//!
//! Provides an in-memory pipeline harness, canonical event builders and
//! correction drafts, so tests read as scenario scripts.

mod events;

pub use events::{
    completion_event, created_event, echa_event, extrusion_event, granulation_event,
    inbound_event, manufacturing_completed_event, manufacturing_started_event,
    metal_removal_event, purification_event, return_event, transfer_event, weight_correction,
};

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reloop_domain::{CampaignId, CampaignProjection};
use reloop_eventlog::{Actor, EventLog, MemoryEventStore};
use reloop_projector::Projector;
use reloop_store::MemoryProjectionStore;

/// Install a fmt subscriber filtered by `RUST_LOG`, so test runs show
/// the pipeline's structured logs. Repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .try_init();
}

/// The standard actor for test-authored events.
pub fn test_actor() -> Actor {
    Actor::operator("test-user")
}

/// A full campaign pipeline wired to in-memory stores.
pub struct TestPipeline {
    /// Write and read service under test
    pub projector: Projector,
    /// The shared event log
    pub log: EventLog,
    /// Raw event store, for direct inspection
    pub event_store: Arc<MemoryEventStore>,
    /// Raw projection store, for direct inspection
    pub projection_store: Arc<MemoryProjectionStore>,
}

impl TestPipeline {
    /// Wire up a fresh pipeline.
    pub fn new() -> Self {
        init_tracing();
        let event_store = Arc::new(MemoryEventStore::new());
        let projection_store = Arc::new(MemoryProjectionStore::new());
        let log = EventLog::new(event_store.clone());
        let projector = Projector::new(log.clone(), projection_store.clone());
        Self {
            projector,
            log,
            event_store,
            projection_store,
        }
    }

    /// The campaign's projection, which must exist.
    pub async fn projection(&self, campaign_id: &CampaignId) -> CampaignProjection {
        self.projector
            .get(campaign_id)
            .await
            .expect("projection store read failed")
            .expect("projection missing for campaign")
    }
}

impl Default for TestPipeline {
    fn default() -> Self {
        Self::new()
    }
}
