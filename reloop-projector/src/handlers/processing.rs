//! Intake and processing step handlers
//!
//! INVARIANT: each of these events designates one weight field, and that
//! value becomes the campaign's current weight (last write wins).

use reloop_domain::{CampaignProjection, EventKind};
use reloop_eventlog::EventRecord;

use crate::error::Result;
use crate::handlers::{advance_status, apply_designated_weight};

/// Shared by inbound receipt and the four processing steps: advance the
/// pipeline and take over the step's designated output weight.
pub(crate) fn handle_weight_step(
    projection: &mut CampaignProjection,
    kind: EventKind,
    record: &EventRecord,
) -> Result<()> {
    if let Some(target) = kind.target_status() {
        advance_status(projection, target);
    }
    apply_designated_weight(projection, kind, &record.payload);
    projection.note_event(&record.kind, record.recorded_at);

    Ok(())
}
