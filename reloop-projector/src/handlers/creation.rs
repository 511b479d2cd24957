//! Campaign creation handler
//!
//! INVARIANT: campaign_created carries the full campaign identity, and
//! every field write here is absolute. Replaying the event onto any
//! prior state converges on the same row.

use reloop_domain::{CampaignCreated, CampaignProjection, CampaignStatus};
use reloop_eventlog::EventRecord;
use tracing::warn;

use crate::error::{ProjectionError, Result};

pub(crate) fn handle_campaign_created(
    projection: &mut CampaignProjection,
    record: &EventRecord,
) -> Result<()> {
    let payload: CampaignCreated = serde_json::from_value(record.payload.clone()).map_err(|e| {
        ProjectionError::InvalidPayload {
            kind: record.kind.clone(),
            reason: e.to_string(),
        }
    })?;

    // A fresh projection has seen no events yet
    if projection.last_event_kind.is_some() {
        warn!(
            campaign_id = %projection.campaign_id,
            "Duplicate campaign_created, applying last write"
        );
    }

    projection.reference_code = payload.reference_code.as_str().to_string();
    projection.material = payload.material.as_str().to_string();
    projection.description = payload.description;
    projection.set_status(CampaignStatus::Created);
    projection.note_event(&record.kind, record.recorded_at);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use reloop_domain::CampaignId;
    use reloop_eventlog::Actor;
    use serde_json::json;

    fn created_record(payload: serde_json::Value) -> EventRecord {
        let now = Utc::now();
        EventRecord {
            event_id: reloop_domain::EventId::new(),
            stream_type: "campaign".to_string(),
            stream_id: "c1".to_string(),
            kind: "campaign_created".to_string(),
            payload,
            actor: Actor::operator("jdoe"),
            occurred_at: now,
            recorded_at: now,
        }
    }

    #[test]
    fn test_handle_campaign_created_fills_identity() {
        let record = created_record(json!({
            "reference_code": "LEGO-2024-001",
            "material": "rABS",
            "description": "First recycled ABS batch"
        }));
        let mut projection = CampaignProjection::new(CampaignId::new(), record.recorded_at);

        handle_campaign_created(&mut projection, &record).unwrap();

        assert_eq!(projection.reference_code, "LEGO-2024-001");
        assert_eq!(projection.material, "rABS");
        assert_eq!(
            projection.description.as_deref(),
            Some("First recycled ABS batch")
        );
        assert_eq!(projection.status, CampaignStatus::Created);
        assert_eq!(projection.last_event_kind.as_deref(), Some("campaign_created"));
    }

    #[test]
    fn test_handle_campaign_created_rejects_bad_payload() {
        let record = created_record(json!({"material": "rABS"}));
        let mut projection = CampaignProjection::new(CampaignId::new(), record.recorded_at);

        let err = handle_campaign_created(&mut projection, &record).unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::InvalidPayload { ref kind, .. } if kind == "campaign_created"
        ));
    }

    #[test]
    fn test_duplicate_campaign_created_takes_last_write() {
        let first = created_record(json!({
            "reference_code": "LEGO-2024-001",
            "material": "rABS"
        }));
        let second = created_record(json!({
            "reference_code": "LEGO-2024-001-B",
            "material": "rPC"
        }));
        let mut projection = CampaignProjection::new(CampaignId::new(), first.recorded_at);

        handle_campaign_created(&mut projection, &first).unwrap();
        handle_campaign_created(&mut projection, &second).unwrap();

        assert_eq!(projection.reference_code, "LEGO-2024-001-B");
        assert_eq!(projection.material, "rPC");
        assert!(projection.description.is_none());
    }
}
