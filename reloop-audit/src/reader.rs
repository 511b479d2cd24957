//! Correction audit reader
//!
//! Reads correction events back out of the log and joins each one with
//! its campaign's reference code. The log is the only source for the
//! entries themselves; the projection contributes labels, nothing more.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use reloop_domain::{CampaignId, CorrectionPayload};
use reloop_eventlog::{CorrectionQuery, EventLog};
use reloop_store::ProjectionRepository;

use crate::error::Result;
use crate::types::{AuditEntry, AuditPage};

/// Read-only view over the correction audit trail.
#[derive(Clone)]
pub struct AuditReader {
    log: EventLog,
    projections: Arc<dyn ProjectionRepository>,
}

impl AuditReader {
    /// Create a reader over a log and a projection store.
    pub fn new(log: EventLog, projections: Arc<dyn ProjectionRepository>) -> Self {
        Self { log, projections }
    }

    /// One page of corrections matching the filter, newest first.
    ///
    /// A correction whose payload does not parse is dropped from the
    /// page with a warning; it still counts toward `total`, which is
    /// computed by the store before decoding.
    pub async fn corrections(&self, query: &CorrectionQuery) -> Result<AuditPage> {
        let (records, total) = self.log.corrections(query).await?;

        // Reference lookups are cached per call; pages often repeat the
        // same handful of campaigns
        let mut labels: HashMap<String, String> = HashMap::new();
        let mut entries = Vec::with_capacity(records.len());

        for record in records {
            let payload: CorrectionPayload = match serde_json::from_value(record.payload.clone())
            {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(
                        event_id = %record.event_id,
                        error = %e,
                        "Unparseable correction payload, dropping from audit page"
                    );
                    continue;
                }
            };

            let campaign_reference = match labels.get(&record.stream_id) {
                Some(cached) => cached.clone(),
                None => {
                    let label = self.lookup_reference(&record.stream_id).await?;
                    labels.insert(record.stream_id.clone(), label.clone());
                    label
                }
            };

            entries.push(AuditEntry {
                event_id: record.event_id,
                campaign_id: record.stream_id,
                campaign_reference,
                corrected_event_id: payload.corrects_event_id,
                corrected_event_kind: payload.corrects_event_kind,
                reason: payload.reason,
                changes: payload.changes,
                actor: record.actor,
                recorded_at: record.recorded_at,
            });
        }

        Ok(AuditPage {
            entries,
            total,
            offset: query.offset,
            limit: query.limit,
        })
    }

    /// All corrections of one campaign, newest first, default page size.
    pub async fn campaign_corrections(&self, campaign_id: &CampaignId) -> Result<AuditPage> {
        self.corrections(&CorrectionQuery::new().for_campaign(campaign_id))
            .await
    }

    /// Display label for a stream: the campaign reference code, or the
    /// raw stream id when no projection row exists yet.
    async fn lookup_reference(&self, stream_id: &str) -> Result<String> {
        let Ok(campaign_id) = stream_id.parse::<CampaignId>() else {
            return Ok(stream_id.to_string());
        };
        let projection = self.projections.find_by_id(&campaign_id).await?;
        Ok(projection
            .map(|p| p.reference_code)
            .unwrap_or_else(|| stream_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use reloop_domain::{CampaignProjection, EventId};
    use reloop_eventlog::{Actor, EventRecord, EventStore, MemoryEventStore};
    use reloop_store::MemoryProjectionStore;
    use serde_json::json;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn correction_record(
        stream_id: &str,
        minutes: i64,
        corrected_kind: &str,
        reason: &str,
    ) -> EventRecord {
        let at = base_time() + Duration::minutes(minutes);
        EventRecord {
            event_id: EventId::new(),
            stream_type: "campaign".to_string(),
            stream_id: stream_id.to_string(),
            kind: "correction_recorded".to_string(),
            payload: json!({
                "corrects_event_id": EventId::new(),
                "corrects_event_kind": corrected_kind,
                "reason": reason,
                "changes": {
                    "net_weight_kg": {"was": "100", "now": "95"}
                }
            }),
            actor: Actor::operator("auditor"),
            occurred_at: at,
            recorded_at: at,
        }
    }

    async fn reader_with(
        corrections: Vec<EventRecord>,
        projections: Vec<CampaignProjection>,
    ) -> AuditReader {
        let event_store = Arc::new(MemoryEventStore::new());
        for record in corrections {
            event_store.insert(record).await.unwrap();
        }
        let projection_store = Arc::new(MemoryProjectionStore::new());
        for projection in projections {
            projection_store.upsert(&projection).await.unwrap();
        }
        AuditReader::new(EventLog::new(event_store), projection_store)
    }

    #[tokio::test]
    async fn test_corrections_join_campaign_reference() {
        let campaign_id = CampaignId::new();
        let mut projection = CampaignProjection::new(campaign_id, base_time());
        projection.reference_code = "LEGO-2024-001".to_string();

        let reader = reader_with(
            vec![correction_record(
                &campaign_id.to_string(),
                10,
                "inbound_shipment_recorded",
                "scale misread",
            )],
            vec![projection],
        )
        .await;

        let page = reader.corrections(&CorrectionQuery::new()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.entries.len(), 1);

        let entry = &page.entries[0];
        assert_eq!(entry.campaign_id, campaign_id.to_string());
        assert_eq!(entry.campaign_reference, "LEGO-2024-001");
        assert_eq!(entry.corrected_event_kind, "inbound_shipment_recorded");
        assert_eq!(entry.reason, "scale misread");
        assert_eq!(entry.actor.actor_id, "auditor");
        assert_eq!(
            entry.changes.get("net_weight_kg").unwrap().now,
            json!("95")
        );
    }

    #[tokio::test]
    async fn test_missing_projection_falls_back_to_raw_id() {
        let campaign_id = CampaignId::new();
        let reader = reader_with(
            vec![correction_record(
                &campaign_id.to_string(),
                10,
                "granulation_completed",
                "typo",
            )],
            vec![],
        )
        .await;

        let page = reader.corrections(&CorrectionQuery::new()).await.unwrap();
        assert_eq!(page.entries[0].campaign_reference, campaign_id.to_string());
    }

    #[tokio::test]
    async fn test_filter_by_corrected_kind() {
        let campaign_id = CampaignId::new();
        let stream = campaign_id.to_string();
        let reader = reader_with(
            vec![
                correction_record(&stream, 10, "inbound_shipment_recorded", "scale misread"),
                correction_record(&stream, 20, "granulation_completed", "typo"),
            ],
            vec![],
        )
        .await;

        let page = reader
            .corrections(&CorrectionQuery::new().corrected_kind("granulation_completed"))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.entries[0].corrected_event_kind, "granulation_completed");
    }

    #[tokio::test]
    async fn test_pagination_reports_full_total() {
        let campaign_id = CampaignId::new();
        let stream = campaign_id.to_string();
        let corrections = (0..5)
            .map(|i| correction_record(&stream, i, "inbound_shipment_recorded", "recheck"))
            .collect();
        let reader = reader_with(corrections, vec![]).await;

        let page = reader
            .corrections(&CorrectionQuery::new().offset(2).limit(2))
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.offset, 2);
        assert_eq!(page.limit, 2);
        // Newest first: offset 2 lands on minute 2, then minute 1
        assert_eq!(page.entries[0].recorded_at, base_time() + Duration::minutes(2));
        assert_eq!(page.entries[1].recorded_at, base_time() + Duration::minutes(1));
    }

    #[tokio::test]
    async fn test_campaign_corrections_scopes_to_one_stream() {
        let first = CampaignId::new();
        let second = CampaignId::new();
        let reader = reader_with(
            vec![
                correction_record(&first.to_string(), 10, "inbound_shipment_recorded", "a"),
                correction_record(&second.to_string(), 20, "inbound_shipment_recorded", "b"),
            ],
            vec![],
        )
        .await;

        let page = reader.campaign_corrections(&first).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.entries[0].campaign_id, first.to_string());
    }

    #[tokio::test]
    async fn test_unparseable_correction_is_dropped_from_page() {
        let campaign_id = CampaignId::new();
        let at = base_time();
        let broken = EventRecord {
            event_id: EventId::new(),
            stream_type: "campaign".to_string(),
            stream_id: campaign_id.to_string(),
            kind: "correction_recorded".to_string(),
            payload: json!({"reason": "missing target fields"}),
            actor: Actor::system("importer"),
            occurred_at: at,
            recorded_at: at,
        };
        let reader = reader_with(
            vec![
                broken,
                correction_record(
                    &campaign_id.to_string(),
                    10,
                    "inbound_shipment_recorded",
                    "scale misread",
                ),
            ],
            vec![],
        )
        .await;

        let page = reader.corrections(&CorrectionQuery::new()).await.unwrap();
        // The broken record still counts, but cannot be shown
        assert_eq!(page.total, 2);
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].reason, "scale misread");
    }
}
