//! Corrections: non-destructive edits to recorded event payloads.
//!
//! A correction is an ordinary appended event. The event it targets is
//! never rewritten; readers fold corrections in at query time.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::ids::EventId;

/// Payload fields that feed the campaign weight accumulator.
pub const WEIGHT_FIELDS: [&str; 3] = ["net_weight_kg", "output_weight_kg", "received_weight_kg"];

/// Whether a payload field participates in weight accounting.
pub fn is_weight_field(field: &str) -> bool {
    WEIGHT_FIELDS.contains(&field)
}

/// Before/after pair for one corrected payload field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Value the field held when the correction was recorded
    pub was: Value,
    /// Replacement value
    pub now: Value,
}

/// Payload of a `correction_recorded` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionPayload {
    /// Event whose payload is being corrected
    pub corrects_event_id: EventId,
    /// Kind of the corrected event, denormalized for audit filtering
    pub corrects_event_kind: String,
    /// Operator-supplied justification
    pub reason: String,
    /// Replacement values keyed by payload field name
    pub changes: BTreeMap<String, FieldChange>,
}

impl CorrectionPayload {
    /// Whether any corrected field participates in weight accounting.
    pub fn touches_weight(&self) -> bool {
        self.changes.keys().any(|field| is_weight_field(field))
    }
}

/// Caller-side description of a correction, before it is resolved
/// against the target event and appended.
///
/// The target's kind is filled in by the engine from the stored record,
/// so callers cannot mislabel it.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionDraft {
    /// Event to correct
    pub corrects_event_id: EventId,
    /// Operator-supplied justification
    pub reason: String,
    /// Replacement values keyed by payload field name
    pub changes: BTreeMap<String, FieldChange>,
}

impl CorrectionDraft {
    /// Start a draft correcting the given event.
    pub fn new(corrects_event_id: EventId, reason: &str) -> Self {
        Self {
            corrects_event_id,
            reason: reason.to_string(),
            changes: BTreeMap::new(),
        }
    }

    /// Add a field change (builder style).
    pub fn with_change(mut self, field: &str, was: Value, now: Value) -> Self {
        self.changes
            .insert(field.to_string(), FieldChange { was, now });
        self
    }

    /// Resolve into a full payload once the target's kind is known.
    pub fn into_payload(self, corrects_event_kind: &str) -> CorrectionPayload {
        CorrectionPayload {
            corrects_event_id: self.corrects_event_id,
            corrects_event_kind: corrects_event_kind.to_string(),
            reason: self.reason,
            changes: self.changes,
        }
    }

    /// Whether any corrected field participates in weight accounting.
    pub fn touches_weight(&self) -> bool {
        self.changes.keys().any(|field| is_weight_field(field))
    }
}

// =============================================================================
// Tests
// =============================================================================
