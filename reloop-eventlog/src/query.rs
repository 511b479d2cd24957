//! Event reading
//!
//! All stream reads come back oldest first by `(recorded_at, event_id)`.
//! Cross-stream listings come back newest first.

use reloop_domain::{CampaignId, CAMPAIGN_STREAM_TYPE};

use crate::append::EventLog;
use crate::types::{CorrectionQuery, EventRecord, Result};

impl EventLog {
    /// All events of one stream, oldest first.
    pub async fn read_stream(
        &self,
        stream_type: &str,
        stream_id: &str,
    ) -> Result<Vec<EventRecord>> {
        self.store().fetch_stream(stream_type, stream_id).await
    }

    /// All events of one campaign, oldest first.
    pub async fn read_campaign(&self, campaign_id: &CampaignId) -> Result<Vec<EventRecord>> {
        self.read_stream(CAMPAIGN_STREAM_TYPE, &campaign_id.to_string())
            .await
    }

    /// All events of one kind across streams, newest first.
    pub async fn read_by_kind(&self, kind: &str) -> Result<Vec<EventRecord>> {
        self.store().fetch_by_kind(kind).await
    }

    /// The most recent event of one stream, if any.
    pub async fn read_latest(
        &self,
        stream_type: &str,
        stream_id: &str,
    ) -> Result<Option<EventRecord>> {
        self.store().fetch_latest(stream_type, stream_id).await
    }

    /// One page of corrections matching the filter, newest first, with
    /// the total match count before paging.
    pub async fn corrections(&self, query: &CorrectionQuery) -> Result<(Vec<EventRecord>, u64)> {
        self.store().fetch_corrections(query).await
    }
}
