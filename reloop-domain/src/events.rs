//! Campaign events: the closed kind enumeration and typed payloads.
//!
//! Producers construct `CampaignEvent` values, whose payloads are
//! validated at construction time. The event log stores the kind string
//! and the payload JSON separately, so readers stay tolerant of kind
//! strings this enumeration does not know.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::correction::CorrectionPayload;
use crate::status::CampaignStatus;
use crate::value_objects::{MaterialCode, ReferenceCode, WeightKg};

// =============================================================================
// EventKind
// =============================================================================

/// Closed enumeration of the event kinds this system understands.
///
/// Twelve business kinds (one per pipeline step, plus creation) and the
/// correction marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A campaign was registered
    CampaignCreated,
    /// Recycled material arrived at the processing site
    InboundShipmentRecorded,
    /// Granulation finished
    GranulationCompleted,
    /// Metal removal finished
    MetalRemovalCompleted,
    /// Polymer purification finished
    PolymerPurificationCompleted,
    /// Extrusion finished
    ExtrusionCompleted,
    /// ECHA compliance approval granted
    EchaApprovalGranted,
    /// Batch handed over to the RGE manufacturing site
    TransferredToRge,
    /// Manufacturing run started
    ManufacturingStarted,
    /// Manufacturing run finished
    ManufacturingCompleted,
    /// Finished goods shipped back to LEGO
    ReturnedToLego,
    /// Campaign closed
    CampaignCompleted,
    /// A recorded event's payload was corrected
    CorrectionRecorded,
}

impl EventKind {
    /// All known kinds, business kinds in pipeline order.
    pub const ALL: [EventKind; 13] = [
        EventKind::CampaignCreated,
        EventKind::InboundShipmentRecorded,
        EventKind::GranulationCompleted,
        EventKind::MetalRemovalCompleted,
        EventKind::PolymerPurificationCompleted,
        EventKind::ExtrusionCompleted,
        EventKind::EchaApprovalGranted,
        EventKind::TransferredToRge,
        EventKind::ManufacturingStarted,
        EventKind::ManufacturingCompleted,
        EventKind::ReturnedToLego,
        EventKind::CampaignCompleted,
        EventKind::CorrectionRecorded,
    ];

    /// Canonical kind string as stored in the event log.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::CampaignCreated => "campaign_created",
            EventKind::InboundShipmentRecorded => "inbound_shipment_recorded",
            EventKind::GranulationCompleted => "granulation_completed",
            EventKind::MetalRemovalCompleted => "metal_removal_completed",
            EventKind::PolymerPurificationCompleted => "polymer_purification_completed",
            EventKind::ExtrusionCompleted => "extrusion_completed",
            EventKind::EchaApprovalGranted => "echa_approval_granted",
            EventKind::TransferredToRge => "transferred_to_rge",
            EventKind::ManufacturingStarted => "manufacturing_started",
            EventKind::ManufacturingCompleted => "manufacturing_completed",
            EventKind::ReturnedToLego => "returned_to_lego",
            EventKind::CampaignCompleted => "campaign_completed",
            EventKind::CorrectionRecorded => "correction_recorded",
        }
    }

    /// Parse a stored kind string; `None` for kinds this build does not know.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == s)
    }

    /// Whether this kind is the correction marker rather than a business event.
    pub fn is_correction(&self) -> bool {
        matches!(self, EventKind::CorrectionRecorded)
    }

    /// Status a campaign moves to when an event of this kind is applied.
    ///
    /// Total over business kinds; `None` only for corrections, which
    /// never change status.
    pub fn target_status(&self) -> Option<CampaignStatus> {
        match self {
            EventKind::CampaignCreated => Some(CampaignStatus::Created),
            EventKind::InboundShipmentRecorded => Some(CampaignStatus::InboundShipmentRecorded),
            EventKind::GranulationCompleted => Some(CampaignStatus::GranulationComplete),
            EventKind::MetalRemovalCompleted => Some(CampaignStatus::MetalRemovalComplete),
            EventKind::PolymerPurificationCompleted => {
                Some(CampaignStatus::PolymerPurificationComplete)
            }
            EventKind::ExtrusionCompleted => Some(CampaignStatus::ExtrusionComplete),
            EventKind::EchaApprovalGranted => Some(CampaignStatus::EchaApproved),
            EventKind::TransferredToRge => Some(CampaignStatus::TransferredToRge),
            EventKind::ManufacturingStarted => Some(CampaignStatus::ManufacturingStarted),
            EventKind::ManufacturingCompleted => Some(CampaignStatus::ManufacturingComplete),
            EventKind::ReturnedToLego => Some(CampaignStatus::ReturnedToLego),
            EventKind::CampaignCompleted => Some(CampaignStatus::Completed),
            EventKind::CorrectionRecorded => None,
        }
    }

    /// Payload field feeding the campaign weight accumulator, if any.
    pub fn weight_field(&self) -> Option<&'static str> {
        match self {
            EventKind::InboundShipmentRecorded => Some("net_weight_kg"),
            EventKind::GranulationCompleted
            | EventKind::MetalRemovalCompleted
            | EventKind::PolymerPurificationCompleted
            | EventKind::ExtrusionCompleted => Some("output_weight_kg"),
            EventKind::TransferredToRge => Some("received_weight_kg"),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// Payload of `campaign_created`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignCreated {
    /// External campaign label (the batch code on the paperwork)
    pub reference_code: ReferenceCode,
    /// Material classification of the batch
    pub material: MaterialCode,
    /// Free-form description
    pub description: Option<String>,
}

/// Payload of `inbound_shipment_recorded`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundShipmentRecorded {
    /// Net weight of usable material received, in kilograms
    pub net_weight_kg: WeightKg,
    /// Gross weight including packaging, when weighed
    pub gross_weight_kg: Option<WeightKg>,
    /// Carrier delivery note reference
    pub delivery_note: Option<String>,
}

/// Payload shared by the four processing-step completion kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStepCompleted {
    /// Material weight coming out of the step, in kilograms
    pub output_weight_kg: WeightKg,
    /// Weight fed into the step, when recorded
    pub input_weight_kg: Option<WeightKg>,
    /// Operator remarks
    pub operator_notes: Option<String>,
}

/// Payload of `echa_approval_granted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchaApprovalGranted {
    /// Reference of the issued certificate
    pub certificate_ref: Option<String>,
}

/// Payload of `transferred_to_rge`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferredToRge {
    /// Weight confirmed on receipt at the manufacturing site, when weighed
    pub received_weight_kg: Option<WeightKg>,
    /// Shipping waybill reference
    pub waybill: Option<String>,
}

/// Payload of `manufacturing_started`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingStarted {
    /// Production line the batch was assigned to
    pub production_line: Option<String>,
}

/// Payload of `manufacturing_completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingCompleted {
    /// Number of units produced from the batch
    pub units_produced: Option<u64>,
}

/// Payload of `returned_to_lego`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnedToLego {
    /// Return shipment reference
    pub return_reference: Option<String>,
}

/// Payload of `campaign_completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignCompleted {
    /// Closing remarks
    pub notes: Option<String>,
}

// =============================================================================
// CampaignEvent
// =============================================================================

/// Tagged union of typed event payloads.
///
/// Serializes with an embedded `type` tag equal to the kind string; the
/// log envelope strips the tag and stores kind and payload separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CampaignEvent {
    /// A campaign was registered
    CampaignCreated(CampaignCreated),
    /// Recycled material arrived at the processing site
    InboundShipmentRecorded(InboundShipmentRecorded),
    /// Granulation finished
    GranulationCompleted(ProcessingStepCompleted),
    /// Metal removal finished
    MetalRemovalCompleted(ProcessingStepCompleted),
    /// Polymer purification finished
    PolymerPurificationCompleted(ProcessingStepCompleted),
    /// Extrusion finished
    ExtrusionCompleted(ProcessingStepCompleted),
    /// ECHA compliance approval granted
    EchaApprovalGranted(EchaApprovalGranted),
    /// Batch handed over to the RGE manufacturing site
    TransferredToRge(TransferredToRge),
    /// Manufacturing run started
    ManufacturingStarted(ManufacturingStarted),
    /// Manufacturing run finished
    ManufacturingCompleted(ManufacturingCompleted),
    /// Finished goods shipped back to LEGO
    ReturnedToLego(ReturnedToLego),
    /// Campaign closed
    CampaignCompleted(CampaignCompleted),
    /// A recorded event's payload was corrected
    CorrectionRecorded(CorrectionPayload),
}

impl CampaignEvent {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            CampaignEvent::CampaignCreated(_) => EventKind::CampaignCreated,
            CampaignEvent::InboundShipmentRecorded(_) => EventKind::InboundShipmentRecorded,
            CampaignEvent::GranulationCompleted(_) => EventKind::GranulationCompleted,
            CampaignEvent::MetalRemovalCompleted(_) => EventKind::MetalRemovalCompleted,
            CampaignEvent::PolymerPurificationCompleted(_) => {
                EventKind::PolymerPurificationCompleted
            }
            CampaignEvent::ExtrusionCompleted(_) => EventKind::ExtrusionCompleted,
            CampaignEvent::EchaApprovalGranted(_) => EventKind::EchaApprovalGranted,
            CampaignEvent::TransferredToRge(_) => EventKind::TransferredToRge,
            CampaignEvent::ManufacturingStarted(_) => EventKind::ManufacturingStarted,
            CampaignEvent::ManufacturingCompleted(_) => EventKind::ManufacturingCompleted,
            CampaignEvent::ReturnedToLego(_) => EventKind::ReturnedToLego,
            CampaignEvent::CampaignCompleted(_) => EventKind::CampaignCompleted,
            CampaignEvent::CorrectionRecorded(_) => EventKind::CorrectionRecorded,
        }
    }

    /// Serialize the payload alone, without the `type` tag.
    pub fn payload_value(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(map) = value.as_object_mut() {
            map.remove("type");
        }
        Ok(value)
    }

    /// Reassemble a typed event from a stored kind string and payload.
    ///
    /// Fails for unknown kinds and for payloads that do not match the
    /// kind's schema.
    pub fn from_parts(kind: &str, payload: &Value) -> serde_json::Result<Self> {
        let mut value = payload.clone();
        if let Some(map) = value.as_object_mut() {
            map.insert("type".to_string(), Value::String(kind.to_string()));
        }
        serde_json::from_value(value)
    }
}

// =============================================================================
// Weight extraction
// =============================================================================

/// Read a decimal payload field, accepting JSON strings or numbers.
pub fn decimal_field(payload: &Value, field: &str) -> Option<Decimal> {
    let raw = match payload.get(field)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()
}

/// Extract the weight a payload contributes to the weight accumulator.
///
/// `None` when the kind carries no designated weight field, the field is
/// absent, or the value does not parse as a non-negative decimal. Shared
/// by the live apply path and correction replay so the two cannot
/// diverge.
pub fn designated_weight(kind: EventKind, payload: &Value) -> Option<WeightKg> {
    let field = kind.weight_field()?;
    let value = decimal_field(payload, field)?;
    WeightKg::new(value).ok()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn sample_created() -> CampaignEvent {
        CampaignEvent::CampaignCreated(CampaignCreated {
            reference_code: ReferenceCode::new("RC-2024-018").unwrap(),
            material: MaterialCode::new("ABS").unwrap(),
            description: Some("Pilot batch".to_string()),
        })
    }

    fn sample_inbound() -> CampaignEvent {
        CampaignEvent::InboundShipmentRecorded(InboundShipmentRecorded {
            net_weight_kg: WeightKg::new(dec!(100)).unwrap(),
            gross_weight_kg: Some(WeightKg::new(dec!(104.2)).unwrap()),
            delivery_note: Some("DN-7781".to_string()),
        })
    }

    fn sample_granulation() -> CampaignEvent {
        CampaignEvent::GranulationCompleted(ProcessingStepCompleted {
            output_weight_kg: WeightKg::new(dec!(95)).unwrap(),
            input_weight_kg: Some(WeightKg::new(dec!(100)).unwrap()),
            operator_notes: None,
        })
    }

    #[test]
    fn test_kind_string_roundtrip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::parse("pallet_shrink_wrapped"), None);
    }

    #[test]
    fn test_kind_serde_matches_as_str() {
        for kind in EventKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, Value::String(kind.as_str().to_string()));
        }
    }

    #[test]
    fn test_only_correction_lacks_target_status() {
        for kind in EventKind::ALL {
            assert_eq!(kind.target_status().is_none(), kind.is_correction());
        }
    }

    #[test]
    fn test_weight_fields() {
        assert_eq!(
            EventKind::InboundShipmentRecorded.weight_field(),
            Some("net_weight_kg")
        );
        assert_eq!(
            EventKind::GranulationCompleted.weight_field(),
            Some("output_weight_kg")
        );
        assert_eq!(
            EventKind::ExtrusionCompleted.weight_field(),
            Some("output_weight_kg")
        );
        assert_eq!(
            EventKind::TransferredToRge.weight_field(),
            Some("received_weight_kg")
        );
        assert_eq!(EventKind::CampaignCreated.weight_field(), None);
        assert_eq!(EventKind::EchaApprovalGranted.weight_field(), None);
        assert_eq!(EventKind::CorrectionRecorded.weight_field(), None);
    }

    #[test]
    fn test_event_tag_matches_kind_string() {
        for event in [sample_created(), sample_inbound(), sample_granulation()] {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(
                json.get("type"),
                Some(&Value::String(event.kind().as_str().to_string()))
            );
        }
    }

    #[test]
    fn test_payload_value_strips_tag() {
        let payload = sample_inbound().payload_value().unwrap();
        assert!(payload.get("type").is_none());
        assert_eq!(payload.get("net_weight_kg"), Some(&json!("100")));
    }

    #[test]
    fn test_from_parts_roundtrip() {
        for event in [sample_created(), sample_inbound(), sample_granulation()] {
            let payload = event.payload_value().unwrap();
            let back = CampaignEvent::from_parts(event.kind().as_str(), &payload).unwrap();
            assert_eq!(back, event);
        }
    }

    #[test]
    fn test_from_parts_rejects_unknown_kind() {
        assert!(CampaignEvent::from_parts("pallet_shrink_wrapped", &json!({})).is_err());
    }

    #[test]
    fn test_decimal_field_accepts_strings_and_numbers() {
        let payload = json!({"a": "95.5", "b": 95.5, "c": 95});
        assert_eq!(decimal_field(&payload, "a"), Some(dec!(95.5)));
        assert_eq!(decimal_field(&payload, "b"), Some(dec!(95.5)));
        assert_eq!(decimal_field(&payload, "c"), Some(dec!(95)));
    }

    #[test]
    fn test_decimal_field_rejects_non_numeric() {
        let payload = json!({"a": null, "b": true, "c": "heavy", "d": [1]});
        for field in ["a", "b", "c", "d", "missing"] {
            assert_eq!(decimal_field(&payload, field), None);
        }
    }

    #[test]
    fn test_designated_weight() {
        let inbound = json!({"net_weight_kg": "100"});
        assert_eq!(
            designated_weight(EventKind::InboundShipmentRecorded, &inbound),
            Some(WeightKg::new(dec!(100)).unwrap())
        );

        // Wrong field name for the kind
        assert_eq!(
            designated_weight(EventKind::GranulationCompleted, &inbound),
            None
        );

        // Negative values never reach the accumulator
        let negative = json!({"net_weight_kg": "-5"});
        assert_eq!(
            designated_weight(EventKind::InboundShipmentRecorded, &negative),
            None
        );

        // Kinds without a designated field contribute nothing
        assert_eq!(
            designated_weight(EventKind::CampaignCreated, &json!({"net_weight_kg": "1"})),
            None
        );
    }
}
