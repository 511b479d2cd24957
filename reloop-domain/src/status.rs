//! Campaign lifecycle status and the progression tables.
//!
//! Statuses form a single linear pipeline. The lookup tables are
//! exhaustive `match` expressions, so adding a status without extending
//! them fails to compile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a recycling campaign.
///
/// Strictly linear: `Created` through `Completed`, one status per
/// completed pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    /// Campaign registered, nothing received yet
    Created,
    /// Recycled material arrived at the processing site
    InboundShipmentRecorded,
    /// Granulation step finished
    GranulationComplete,
    /// Metal removal step finished
    MetalRemovalComplete,
    /// Polymer purification step finished
    PolymerPurificationComplete,
    /// Extrusion step finished
    ExtrusionComplete,
    /// ECHA compliance approval granted
    EchaApproved,
    /// Batch handed over to the RGE manufacturing site
    TransferredToRge,
    /// Manufacturing run started
    ManufacturingStarted,
    /// Manufacturing run finished
    ManufacturingComplete,
    /// Finished goods shipped back to LEGO
    ReturnedToLego,
    /// Campaign closed (terminal)
    Completed,
}

impl CampaignStatus {
    /// All statuses in pipeline order.
    pub const ALL: [CampaignStatus; 12] = [
        CampaignStatus::Created,
        CampaignStatus::InboundShipmentRecorded,
        CampaignStatus::GranulationComplete,
        CampaignStatus::MetalRemovalComplete,
        CampaignStatus::PolymerPurificationComplete,
        CampaignStatus::ExtrusionComplete,
        CampaignStatus::EchaApproved,
        CampaignStatus::TransferredToRge,
        CampaignStatus::ManufacturingStarted,
        CampaignStatus::ManufacturingComplete,
        CampaignStatus::ReturnedToLego,
        CampaignStatus::Completed,
    ];

    /// Canonical snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Created => "created",
            CampaignStatus::InboundShipmentRecorded => "inbound_shipment_recorded",
            CampaignStatus::GranulationComplete => "granulation_complete",
            CampaignStatus::MetalRemovalComplete => "metal_removal_complete",
            CampaignStatus::PolymerPurificationComplete => "polymer_purification_complete",
            CampaignStatus::ExtrusionComplete => "extrusion_complete",
            CampaignStatus::EchaApproved => "echa_approved",
            CampaignStatus::TransferredToRge => "transferred_to_rge",
            CampaignStatus::ManufacturingStarted => "manufacturing_started",
            CampaignStatus::ManufacturingComplete => "manufacturing_complete",
            CampaignStatus::ReturnedToLego => "returned_to_lego",
            CampaignStatus::Completed => "completed",
        }
    }

    /// Parse a canonical status name; `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.as_str() == s)
    }

    /// Ordinal position in the pipeline (0 = `Created`, 11 = `Completed`).
    pub fn position(&self) -> usize {
        match self {
            CampaignStatus::Created => 0,
            CampaignStatus::InboundShipmentRecorded => 1,
            CampaignStatus::GranulationComplete => 2,
            CampaignStatus::MetalRemovalComplete => 3,
            CampaignStatus::PolymerPurificationComplete => 4,
            CampaignStatus::ExtrusionComplete => 5,
            CampaignStatus::EchaApproved => 6,
            CampaignStatus::TransferredToRge => 7,
            CampaignStatus::ManufacturingStarted => 8,
            CampaignStatus::ManufacturingComplete => 9,
            CampaignStatus::ReturnedToLego => 10,
            CampaignStatus::Completed => 11,
        }
    }

    /// Human-readable label of the step this status reflects.
    pub fn step_label(&self) -> &'static str {
        match self {
            CampaignStatus::Created => "Campaign created",
            CampaignStatus::InboundShipmentRecorded => "Inbound shipment",
            CampaignStatus::GranulationComplete => "Granulation",
            CampaignStatus::MetalRemovalComplete => "Metal removal",
            CampaignStatus::PolymerPurificationComplete => "Polymer purification",
            CampaignStatus::ExtrusionComplete => "Extrusion",
            CampaignStatus::EchaApproved => "ECHA approval",
            CampaignStatus::TransferredToRge => "Transfer to RGE",
            CampaignStatus::ManufacturingStarted => "Manufacturing start",
            CampaignStatus::ManufacturingComplete => "Manufacturing complete",
            CampaignStatus::ReturnedToLego => "Return to LEGO",
            CampaignStatus::Completed => "Campaign closed",
        }
    }

    /// The immediate successor in the pipeline, `None` for `Completed`.
    pub fn next(&self) -> Option<CampaignStatus> {
        Self::ALL.get(self.position() + 1).copied()
    }

    /// Label of the step the pipeline expects next, `None` once terminal.
    pub fn next_expected_step(&self) -> Option<&'static str> {
        self.next().map(|status| status.step_label())
    }

    /// Whether this status ends the pipeline.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CampaignStatus::Completed)
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================
