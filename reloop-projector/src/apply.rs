//! Event dispatcher for campaign projections
//!
//! Routes events to their projection handlers and folds whole streams
//! into projection rows. The fold is deterministic: the same stream in
//! the same order always produces the same row, byte for byte, because
//! every timestamp written comes from event `recorded_at` values.

use tracing::warn;

use reloop_domain::{CampaignId, CampaignProjection, EventKind};
use reloop_eventlog::EventRecord;

use crate::error::Result;
use crate::handlers;
use crate::replay::replay_current_weight;

/// Projection skeleton for a stream, anchored at its first record.
///
/// Never persisted on its own; the caller applies the stream's events
/// on top before the row is stored.
pub fn initial_projection(campaign_id: &CampaignId, first: &EventRecord) -> CampaignProjection {
    if first.kind != EventKind::CampaignCreated.as_str() {
        warn!(
            campaign_id = %campaign_id,
            kind = %first.kind,
            "Stream does not start with campaign_created"
        );
    }
    CampaignProjection::new(*campaign_id, first.recorded_at)
}

/// Apply a single event to a campaign projection.
///
/// Safe for replay: handlers write absolute values, never increments.
/// Unknown kinds are skipped with a warning so newer event vocabularies
/// do not break older readers.
pub fn apply_event(projection: &mut CampaignProjection, record: &EventRecord) -> Result<()> {
    let Some(kind) = EventKind::parse(&record.kind) else {
        warn!(kind = %record.kind, "Unknown event kind, skipping");
        return Ok(());
    };

    match kind {
        // Lifecycle
        EventKind::CampaignCreated => {
            handlers::creation::handle_campaign_created(projection, record)?
        }

        // Intake and processing (weight-bearing)
        EventKind::InboundShipmentRecorded
        | EventKind::GranulationCompleted
        | EventKind::MetalRemovalCompleted
        | EventKind::PolymerPurificationCompleted
        | EventKind::ExtrusionCompleted => {
            handlers::processing::handle_weight_step(projection, kind, record)?
        }

        // Compliance
        EventKind::EchaApprovalGranted => {
            handlers::compliance::handle_echa_approval(projection, record)?
        }

        // Logistics and manufacturing
        EventKind::TransferredToRge => handlers::logistics::handle_transfer(projection, record)?,
        EventKind::ManufacturingStarted => {
            handlers::logistics::handle_manufacturing_started(projection, record)?
        }
        EventKind::ManufacturingCompleted => {
            handlers::logistics::handle_manufacturing_completed(projection, record)?
        }
        EventKind::ReturnedToLego => handlers::logistics::handle_return(projection, record)?,

        // Closeout
        EventKind::CampaignCompleted => {
            handlers::closeout::handle_campaign_completed(projection, record)?
        }

        // Corrections never move the pipeline; their field changes are
        // folded in by the weight replay at read time
        EventKind::CorrectionRecorded => {
            projection.updated_at = record.recorded_at;
        }
    }

    Ok(())
}

/// Fold a full stream into a projection.
///
/// Returns `None` for an empty stream. The final weight comes from a
/// correction-aware replay over the same records, so a rebuilt row
/// matches the incrementally maintained one exactly.
///
/// # Errors
/// Returns `InvalidPayload` when a campaign_created payload does not
/// match its schema.
pub fn project_stream(
    campaign_id: &CampaignId,
    records: &[EventRecord],
) -> Result<Option<CampaignProjection>> {
    let Some(first) = records.first() else {
        return Ok(None);
    };

    let mut projection = initial_projection(campaign_id, first);
    for record in records {
        apply_event(&mut projection, record)?;
    }
    projection.current_weight_kg = replay_current_weight(records);

    Ok(Some(projection))
}
