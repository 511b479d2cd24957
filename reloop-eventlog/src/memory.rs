//! In-memory event store
//!
//! Used for testing and development without a database.
//! Thread-safe using RwLock for concurrent access.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::RwLock;

use reloop_domain::EventKind;

use crate::store::EventStore;
use crate::types::{CorrectionQuery, EventRecord, Result};

/// In-memory implementation of the event store.
pub struct MemoryEventStore {
    records: RwLock<Vec<EventRecord>>,
}

impl MemoryEventStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored records (useful for test assertions).
    pub fn event_count(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Remove all records (useful for test setup).
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }
}

impl Default for MemoryEventStore {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_correction(record: &EventRecord, query: &CorrectionQuery) -> bool {
    if record.kind != EventKind::CorrectionRecorded.as_str() {
        return false;
    }
    if let Some(stream_id) = &query.stream_id {
        if &record.stream_id != stream_id {
            return false;
        }
    }
    if let Some(kind) = &query.corrected_kind {
        let target = record
            .payload
            .get("corrects_event_kind")
            .and_then(Value::as_str);
        if target != Some(kind.as_str()) {
            return false;
        }
    }
    if let Some(from) = query.recorded_from {
        if record.recorded_at < from {
            return false;
        }
    }
    if let Some(until) = query.recorded_until {
        if record.recorded_at >= until {
            return false;
        }
    }
    true
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn insert(&self, record: EventRecord) -> Result<()> {
        self.records.write().unwrap().push(record);
        Ok(())
    }

    async fn fetch_stream(&self, stream_type: &str, stream_id: &str) -> Result<Vec<EventRecord>> {
        let records = self.records.read().unwrap();
        let mut stream: Vec<EventRecord> = records
            .iter()
            .filter(|r| r.stream_type == stream_type && r.stream_id == stream_id)
            .cloned()
            .collect();
        stream.sort_by(|a, b| (a.recorded_at, a.event_id).cmp(&(b.recorded_at, b.event_id)));
        Ok(stream)
    }

    async fn fetch_by_kind(&self, kind: &str) -> Result<Vec<EventRecord>> {
        let records = self.records.read().unwrap();
        let mut matched: Vec<EventRecord> = records
            .iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect();
        matched.sort_by(|a, b| (b.recorded_at, b.event_id).cmp(&(a.recorded_at, a.event_id)));
        Ok(matched)
    }

    async fn fetch_latest(
        &self,
        stream_type: &str,
        stream_id: &str,
    ) -> Result<Option<EventRecord>> {
        Ok(self.fetch_stream(stream_type, stream_id).await?.pop())
    }

    async fn fetch_corrections(
        &self,
        query: &CorrectionQuery,
    ) -> Result<(Vec<EventRecord>, u64)> {
        let records = self.records.read().unwrap();
        let mut matched: Vec<EventRecord> = records
            .iter()
            .filter(|r| matches_correction(r, query))
            .cloned()
            .collect();
        matched.sort_by(|a, b| (b.recorded_at, b.event_id).cmp(&(a.recorded_at, a.event_id)));

        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();
        Ok((page, total))
    }
}
