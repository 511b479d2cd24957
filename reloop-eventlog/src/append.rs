//! Event appending
//!
//! The log assigns identity and the ordering timestamp at append time.
//! Payloads pass through untouched: producers own the payload contract
//! and the log stays schema-agnostic.

use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use reloop_domain::{CampaignEvent, CampaignId, EventId};

use crate::store::EventStore;
use crate::types::{Actor, EventRecord, NewEvent, Result};

/// Append and read service over an event store.
///
/// Cheap to clone; clones share the underlying store.
#[derive(Clone)]
pub struct EventLog {
    store: Arc<dyn EventStore>,
}

impl EventLog {
    /// Create a log over the given store.
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// Append one event to the log.
    ///
    /// Assigns a fresh event id and stamps `recorded_at`, then persists
    /// the record. `occurred_at` falls back to the append timestamp when
    /// the producer did not report one.
    ///
    /// # Arguments
    /// * `event` - The event to append
    ///
    /// # Returns
    /// The stored record, including the assigned id and timestamps.
    ///
    /// # Errors
    /// Returns `StorageUnavailable` if the store rejects the write.
    pub async fn append(&self, event: NewEvent) -> Result<EventRecord> {
        let recorded_at = Utc::now();
        let record = EventRecord {
            event_id: EventId::new(),
            stream_type: event.stream_type,
            stream_id: event.stream_id,
            kind: event.kind,
            payload: event.payload,
            actor: event.actor,
            occurred_at: event.occurred_at.unwrap_or(recorded_at),
            recorded_at,
        };

        self.store.insert(record.clone()).await?;

        debug!(
            event_id = %record.event_id,
            stream_type = %record.stream_type,
            stream_id = %record.stream_id,
            kind = %record.kind,
            actor = %record.actor.actor_id,
            "Event appended"
        );

        Ok(record)
    }

    /// Append a typed campaign event.
    ///
    /// # Errors
    /// Returns `Serialization` if the payload cannot be converted, or
    /// `StorageUnavailable` if the store rejects the write.
    pub async fn append_event(
        &self,
        campaign_id: &CampaignId,
        event: &CampaignEvent,
        actor: Actor,
    ) -> Result<EventRecord> {
        self.append(NewEvent::campaign(campaign_id, event, actor)?)
            .await
    }
}
