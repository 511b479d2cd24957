//! Audit trail types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use reloop_domain::{EventId, FieldChange};
use reloop_eventlog::Actor;

/// One correction, unpacked for reviewers.
///
/// Everything here comes verbatim from the correction record and its
/// stream; only `campaign_reference` is joined in from the projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    /// Id of the correction event itself
    pub event_id: EventId,
    /// Stream id of the campaign the correction belongs to
    pub campaign_id: String,
    /// Campaign reference code; the raw stream id when no projection
    /// row exists for the campaign
    pub campaign_reference: String,
    /// The event being corrected
    pub corrected_event_id: EventId,
    /// Kind of the event being corrected
    pub corrected_event_kind: String,
    /// Operator-supplied justification
    pub reason: String,
    /// Field-level before and after values
    pub changes: BTreeMap<String, FieldChange>,
    /// Who recorded the correction
    pub actor: Actor,
    /// When the correction entered the log
    pub recorded_at: DateTime<Utc>,
}

/// One page of the correction audit trail, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditPage {
    /// The page's entries
    pub entries: Vec<AuditEntry>,
    /// Total matches before paging
    pub total: u64,
    /// Rows skipped before this page
    pub offset: u64,
    /// Requested page size
    pub limit: u64,
}
