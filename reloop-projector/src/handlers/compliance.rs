//! Compliance handlers

use reloop_domain::{CampaignProjection, CampaignStatus};
use reloop_eventlog::EventRecord;

use crate::error::Result;
use crate::handlers::advance_status;

/// ECHA clearance. Flips the compliance flag and advances the pipeline;
/// the certificate reference stays in the event payload.
pub(crate) fn handle_echa_approval(
    projection: &mut CampaignProjection,
    record: &EventRecord,
) -> Result<()> {
    advance_status(projection, CampaignStatus::EchaApproved);
    projection.echa_cleared = true;
    projection.note_event(&record.kind, record.recorded_at);

    Ok(())
}
