//! Transfer and manufacturing handlers

use reloop_domain::{CampaignProjection, CampaignStatus, EventKind};
use reloop_eventlog::EventRecord;

use crate::error::Result;
use crate::handlers::{advance_status, apply_designated_weight};

/// Custody transfer to the RGE manufacturing site. The received weight
/// is this event's designated weight when the site re-weighed the batch;
/// a transfer without a re-weigh is a normal event shape.
pub(crate) fn handle_transfer(
    projection: &mut CampaignProjection,
    record: &EventRecord,
) -> Result<()> {
    advance_status(projection, CampaignStatus::TransferredToRge);
    if record.payload.get("received_weight_kg").is_some() {
        apply_designated_weight(projection, EventKind::TransferredToRge, &record.payload);
    }
    projection.note_event(&record.kind, record.recorded_at);

    Ok(())
}

pub(crate) fn handle_manufacturing_started(
    projection: &mut CampaignProjection,
    record: &EventRecord,
) -> Result<()> {
    advance_status(projection, CampaignStatus::ManufacturingStarted);
    projection.note_event(&record.kind, record.recorded_at);

    Ok(())
}

pub(crate) fn handle_manufacturing_completed(
    projection: &mut CampaignProjection,
    record: &EventRecord,
) -> Result<()> {
    advance_status(projection, CampaignStatus::ManufacturingComplete);
    projection.note_event(&record.kind, record.recorded_at);

    Ok(())
}

pub(crate) fn handle_return(
    projection: &mut CampaignProjection,
    record: &EventRecord,
) -> Result<()> {
    advance_status(projection, CampaignStatus::ReturnedToLego);
    projection.note_event(&record.kind, record.recorded_at);

    Ok(())
}
