//! Correction-aware weight replay
//!
//! Corrections never rewrite stored events. Readers fold them in: build
//! an overlay of corrected field values per target event, then walk the
//! stream applying each weight-bearing event with its overlay merged.
//! The same extraction code runs here and in the live apply path.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use tracing::warn;

use reloop_domain::{designated_weight, CorrectionPayload, EventId, EventKind, WeightKg};
use reloop_eventlog::EventRecord;

/// Collect the effective corrected values per target event.
///
/// Later corrections win per field. A correction whose payload does not
/// parse is skipped; it still sits in the log for the audit trail.
pub fn correction_overlay(records: &[EventRecord]) -> HashMap<EventId, BTreeMap<String, Value>> {
    let mut overlay: HashMap<EventId, BTreeMap<String, Value>> = HashMap::new();

    for record in records {
        if record.kind != EventKind::CorrectionRecorded.as_str() {
            continue;
        }
        let payload: CorrectionPayload = match serde_json::from_value(record.payload.clone()) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    event_id = %record.event_id,
                    error = %e,
                    "Unparseable correction payload, skipping"
                );
                continue;
            }
        };

        let entry = overlay.entry(payload.corrects_event_id).or_default();
        for (field, change) in payload.changes {
            entry.insert(field, change.now);
        }
    }

    overlay
}

/// Replay the stream and return the campaign's effective current weight.
///
/// Walks weight-bearing events oldest first, merging each event's
/// corrected values over its payload before extraction. The last event
/// with a valid designated weight wins. Events whose merged payload has
/// no valid weight are passed over, exactly as the live path leaves the
/// previous weight in place.
pub fn replay_current_weight(records: &[EventRecord]) -> Option<WeightKg> {
    let overlay = correction_overlay(records);
    let mut current: Option<WeightKg> = None;

    for record in records {
        let Some(kind) = EventKind::parse(&record.kind) else {
            continue;
        };
        if kind.weight_field().is_none() {
            continue;
        }

        let mut payload = record.payload.clone();
        if let Some(changes) = overlay.get(&record.event_id) {
            if let Some(object) = payload.as_object_mut() {
                for (field, value) in changes {
                    object.insert(field.clone(), value.clone());
                }
            }
        }

        if let Some(weight) = designated_weight(kind, &payload) {
            current = Some(weight);
        }
    }

    current
}
