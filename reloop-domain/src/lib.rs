//! Reloop Domain Layer
//!
//! Pure domain logic with zero I/O dependencies.
//! Identifiers, event kinds and typed payloads, the status progression
//! tables, value objects, corrections, and the campaign projection record.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod correction;
pub mod events;
pub mod ids;
pub mod projection;
pub mod status;
pub mod value_objects;

// Re-export commonly used types
pub use correction::{
    is_weight_field, CorrectionDraft, CorrectionPayload, FieldChange, WEIGHT_FIELDS,
};
pub use events::{
    decimal_field, designated_weight, CampaignCompleted, CampaignCreated, CampaignEvent,
    EchaApprovalGranted, EventKind, InboundShipmentRecorded, ManufacturingCompleted,
    ManufacturingStarted, ProcessingStepCompleted, ReturnedToLego, TransferredToRge,
};
pub use ids::{CampaignId, EventId, CAMPAIGN_STREAM_TYPE};
pub use projection::CampaignProjection;
pub use status::CampaignStatus;
pub use value_objects::{DomainError, MaterialCode, ReferenceCode, WeightKg};
