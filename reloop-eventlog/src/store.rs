//! Event storage port
//!
//! Defines the storage interface the log is written against.
//! Implementations can be PostgreSQL or in-memory for testing.

use async_trait::async_trait;

use crate::types::{CorrectionQuery, EventRecord, Result};

/// Append-only storage for event records.
///
/// The interface deliberately has no update and no delete. Orderings are
/// part of the contract: every implementation must sort by
/// `(recorded_at, event_id)` so replays see one total order regardless
/// of timestamp collisions.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert one record. Records are immutable once inserted.
    ///
    /// # Errors
    /// Returns `StorageUnavailable` if the write fails.
    async fn insert(&self, record: EventRecord) -> Result<()>;

    /// All records of one stream, oldest first by `(recorded_at, event_id)`.
    async fn fetch_stream(&self, stream_type: &str, stream_id: &str) -> Result<Vec<EventRecord>>;

    /// All records of one kind across streams, newest first.
    async fn fetch_by_kind(&self, kind: &str) -> Result<Vec<EventRecord>>;

    /// The most recent record of one stream, if any.
    async fn fetch_latest(
        &self,
        stream_type: &str,
        stream_id: &str,
    ) -> Result<Option<EventRecord>>;

    /// One page of correction records matching the filter, newest first,
    /// together with the total match count before paging.
    async fn fetch_corrections(&self, query: &CorrectionQuery)
        -> Result<(Vec<EventRecord>, u64)>;
}
