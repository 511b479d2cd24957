//! Projection handlers, grouped by pipeline phase.

pub mod closeout;
pub mod compliance;
pub mod creation;
pub mod logistics;
pub mod processing;

use reloop_domain::{designated_weight, CampaignProjection, CampaignStatus, EventKind};
use serde_json::Value;
use tracing::warn;

/// Move the projection to `target`.
///
/// Every transition in the log is applied; the log is the source of
/// truth. A transition that is not the single next pipeline step is
/// logged for operators to investigate.
pub(crate) fn advance_status(projection: &mut CampaignProjection, target: CampaignStatus) {
    if target.position() != projection.status.position() + 1 {
        warn!(
            campaign_id = %projection.campaign_id,
            from = %projection.status,
            to = %target,
            "Out-of-order status transition"
        );
    }
    projection.set_status(target);
}

/// Pull the designated weight for `kind` out of the payload and make it
/// the campaign's current weight. A missing or invalid value keeps the
/// previous weight unchanged.
pub(crate) fn apply_designated_weight(
    projection: &mut CampaignProjection,
    kind: EventKind,
    payload: &Value,
) {
    match designated_weight(kind, payload) {
        Some(weight) => projection.current_weight_kg = Some(weight),
        None => warn!(
            campaign_id = %projection.campaign_id,
            kind = %kind,
            "Missing or invalid designated weight, keeping previous value"
        ),
    }
}
