//! Canonical campaign event builders for tests.
//!
//! Weights are passed as decimal strings, matching how they travel in
//! event payloads.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::json;

use reloop_domain::{
    CampaignCompleted, CampaignCreated, CampaignEvent, CorrectionDraft, EchaApprovalGranted,
    EventId, InboundShipmentRecorded, ManufacturingCompleted, ManufacturingStarted, MaterialCode,
    ProcessingStepCompleted, ReferenceCode, ReturnedToLego, TransferredToRge, WeightKg,
};

fn weight(value: &str) -> WeightKg {
    let decimal = Decimal::from_str(value).expect("valid decimal literal");
    WeightKg::new(decimal).expect("non-negative weight literal")
}

fn step(output_weight: &str) -> ProcessingStepCompleted {
    ProcessingStepCompleted {
        output_weight_kg: weight(output_weight),
        input_weight_kg: None,
        operator_notes: None,
    }
}

/// A campaign_created event.
pub fn created_event(reference: &str, material: &str) -> CampaignEvent {
    CampaignEvent::CampaignCreated(CampaignCreated {
        reference_code: ReferenceCode::new(reference).expect("valid reference code"),
        material: MaterialCode::new(material).expect("valid material code"),
        description: None,
    })
}

/// An inbound_shipment_recorded event with the given net weight.
pub fn inbound_event(net_weight: &str) -> CampaignEvent {
    CampaignEvent::InboundShipmentRecorded(InboundShipmentRecorded {
        net_weight_kg: weight(net_weight),
        gross_weight_kg: None,
        delivery_note: None,
    })
}

/// A granulation_completed event with the given output weight.
pub fn granulation_event(output_weight: &str) -> CampaignEvent {
    CampaignEvent::GranulationCompleted(step(output_weight))
}

/// A metal_removal_completed event with the given output weight.
pub fn metal_removal_event(output_weight: &str) -> CampaignEvent {
    CampaignEvent::MetalRemovalCompleted(step(output_weight))
}

/// A polymer_purification_completed event with the given output weight.
pub fn purification_event(output_weight: &str) -> CampaignEvent {
    CampaignEvent::PolymerPurificationCompleted(step(output_weight))
}

/// An extrusion_completed event with the given output weight.
pub fn extrusion_event(output_weight: &str) -> CampaignEvent {
    CampaignEvent::ExtrusionCompleted(step(output_weight))
}

/// An echa_approval_granted event.
pub fn echa_event() -> CampaignEvent {
    CampaignEvent::EchaApprovalGranted(EchaApprovalGranted {
        certificate_ref: Some("ECHA-TEST-1".to_string()),
    })
}

/// A transferred_to_rge event, optionally re-weighed on receipt.
pub fn transfer_event(received_weight: Option<&str>) -> CampaignEvent {
    CampaignEvent::TransferredToRge(TransferredToRge {
        received_weight_kg: received_weight.map(weight),
        waybill: None,
    })
}

/// A manufacturing_started event.
pub fn manufacturing_started_event() -> CampaignEvent {
    CampaignEvent::ManufacturingStarted(ManufacturingStarted {
        production_line: None,
    })
}

/// A manufacturing_completed event.
pub fn manufacturing_completed_event(units_produced: Option<u64>) -> CampaignEvent {
    CampaignEvent::ManufacturingCompleted(ManufacturingCompleted { units_produced })
}

/// A returned_to_lego event.
pub fn return_event() -> CampaignEvent {
    CampaignEvent::ReturnedToLego(ReturnedToLego {
        return_reference: None,
    })
}

/// A campaign_completed event.
pub fn completion_event() -> CampaignEvent {
    CampaignEvent::CampaignCompleted(CampaignCompleted { notes: None })
}

/// A correction draft replacing one weight field on the target event.
pub fn weight_correction(
    target_id: EventId,
    field: &str,
    was: &str,
    now: &str,
) -> CorrectionDraft {
    CorrectionDraft::new(target_id, "corrected after re-weighing").with_change(
        field,
        json!(was),
        json!(now),
    )
}
