//! The campaign projection: one current-state row per campaign.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::CampaignId;
use crate::status::CampaignStatus;
use crate::value_objects::WeightKg;

/// Current-state snapshot of one campaign, derived from its event stream.
///
/// Never authoritative: any row can be rebuilt from the log. All
/// timestamps come from event `recorded_at` values (never the wall clock
/// at apply time), so a rebuild reproduces the incrementally maintained
/// row exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignProjection {
    /// Campaign this row snapshots
    pub campaign_id: CampaignId,
    /// External campaign label, copied from the creating event
    pub reference_code: String,
    /// Material classification, copied from the creating event
    pub material: String,
    /// Free-form description, copied from the creating event
    pub description: Option<String>,
    /// Lifecycle status after the last applied event
    pub status: CampaignStatus,
    /// Label of the furthest pipeline step reached
    pub current_step: String,
    /// Latest known material weight in kilograms
    pub current_weight_kg: Option<WeightKg>,
    /// Label of the step the pipeline expects next
    pub next_expected_step: Option<String>,
    /// Whether ECHA compliance approval has been granted
    pub echa_cleared: bool,
    /// Kind string of the last business event applied
    pub last_event_kind: Option<String>,
    /// `recorded_at` of the last business event applied
    pub last_event_at: Option<DateTime<Utc>>,
    /// `recorded_at` of the first event in the stream
    pub created_at: DateTime<Utc>,
    /// `recorded_at` of the last event that changed this row
    pub updated_at: DateTime<Utc>,
    /// `recorded_at` of the completing event, once terminal
    pub completed_at: Option<DateTime<Utc>>,
}

impl CampaignProjection {
    /// Blank projection positioned at the start of the pipeline.
    ///
    /// Identity and progression fields are filled by applying events;
    /// this is never persisted on its own.
    pub fn new(campaign_id: CampaignId, created_at: DateTime<Utc>) -> Self {
        let status = CampaignStatus::Created;
        Self {
            campaign_id,
            reference_code: String::new(),
            material: String::new(),
            description: None,
            status,
            current_step: status.step_label().to_string(),
            current_weight_kg: None,
            next_expected_step: status.next_expected_step().map(str::to_string),
            echa_cleared: false,
            last_event_kind: None,
            last_event_at: None,
            created_at,
            updated_at: created_at,
            completed_at: None,
        }
    }

    /// Move to a status, keeping the derived step fields consistent.
    pub fn set_status(&mut self, status: CampaignStatus) {
        self.status = status;
        self.current_step = status.step_label().to_string();
        self.next_expected_step = status.next_expected_step().map(str::to_string);
    }

    /// Record the bookkeeping every applied business event shares.
    pub fn note_event(&mut self, kind: &str, recorded_at: DateTime<Utc>) {
        self.last_event_kind = Some(kind.to_string());
        self.last_event_at = Some(recorded_at);
        self.updated_at = recorded_at;
    }

    /// Whether the campaign has reached the terminal status.
    pub fn is_completed(&self) -> bool {
        self.status.is_terminal()
    }
}

// =============================================================================
// Tests
// =============================================================================
