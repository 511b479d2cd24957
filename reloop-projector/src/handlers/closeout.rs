//! Campaign closeout handler

use reloop_domain::{CampaignProjection, CampaignStatus};
use reloop_eventlog::EventRecord;

use crate::error::Result;
use crate::handlers::advance_status;

/// Terminal step. After this the campaign only ever sees corrections.
pub(crate) fn handle_campaign_completed(
    projection: &mut CampaignProjection,
    record: &EventRecord,
) -> Result<()> {
    advance_status(projection, CampaignStatus::Completed);
    projection.completed_at = Some(record.recorded_at);
    projection.note_event(&record.kind, record.recorded_at);

    Ok(())
}
