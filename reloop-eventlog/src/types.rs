//! Event Log Types
//!
//! Core types for the append-only campaign event log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use reloop_domain::{CampaignEvent, CampaignId, EventId, CAMPAIGN_STREAM_TYPE};

// =============================================================================
// Actor
// =============================================================================

/// Category of the actor that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorType {
    /// Human operator at a processing or manufacturing site
    Operator,
    /// Bulk data import job
    Importer,
    /// Internal system process
    System,
}

impl ActorType {
    /// String representation, matching what adapters persist.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::Operator => "Operator",
            ActorType::Importer => "Importer",
            ActorType::System => "System",
        }
    }

    /// Parse the persisted string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Operator" => Some(ActorType::Operator),
            "Importer" => Some(ActorType::Importer),
            "System" => Some(ActorType::System),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who produced an event. Stored verbatim on every record for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Category of the producer
    pub actor_type: ActorType,
    /// Producer identity (operator name, import job id, process name)
    pub actor_id: String,
}

impl Actor {
    /// A human operator.
    pub fn operator(actor_id: impl Into<String>) -> Self {
        Self {
            actor_type: ActorType::Operator,
            actor_id: actor_id.into(),
        }
    }

    /// A bulk import job.
    pub fn importer(actor_id: impl Into<String>) -> Self {
        Self {
            actor_type: ActorType::Importer,
            actor_id: actor_id.into(),
        }
    }

    /// An internal system process.
    pub fn system(actor_id: impl Into<String>) -> Self {
        Self {
            actor_type: ActorType::System,
            actor_id: actor_id.into(),
        }
    }
}

// =============================================================================
// Event Record
// =============================================================================

/// A stored event, exactly as it sits in the log.
///
/// Records are immutable once written. `(recorded_at, event_id)` gives
/// every stream a total order even when timestamps collide, since event
/// ids are time-ordered ULIDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    // Identity
    pub event_id: EventId,

    // Stream partitioning
    pub stream_type: String,
    pub stream_id: String,

    // Kind and data
    pub kind: String,
    pub payload: Value,

    // Provenance
    pub actor: Actor,

    // Temporal: occurred_at is producer-reported, recorded_at is
    // log-assigned and is the ordering timestamp
    pub occurred_at: DateTime<Utc>,
    pub recorded_at: DateTime<Utc>,
}

/// An event about to be appended. Identity and `recorded_at` are
/// assigned by the log at append time, never by the producer.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Stream partition, e.g. `campaign`
    pub stream_type: String,
    /// Stream identity within the partition
    pub stream_id: String,
    /// Event kind string
    pub kind: String,
    /// Kind-specific payload
    pub payload: Value,
    /// Who produced the event
    pub actor: Actor,
    /// Producer-reported wall-clock time, defaults to append time
    pub occurred_at: Option<DateTime<Utc>>,
}

impl NewEvent {
    /// Create an event for an arbitrary stream.
    pub fn new(
        stream_type: impl Into<String>,
        stream_id: impl Into<String>,
        kind: impl Into<String>,
        payload: Value,
        actor: Actor,
    ) -> Self {
        Self {
            stream_type: stream_type.into(),
            stream_id: stream_id.into(),
            kind: kind.into(),
            payload,
            actor,
            occurred_at: None,
        }
    }

    /// Create an event for a campaign stream from a typed domain event.
    ///
    /// # Errors
    /// Returns `Serialization` if the payload cannot be converted to JSON.
    pub fn campaign(campaign_id: &CampaignId, event: &CampaignEvent, actor: Actor) -> Result<Self> {
        Ok(Self::new(
            CAMPAIGN_STREAM_TYPE,
            campaign_id.to_string(),
            event.kind().as_str(),
            event.payload_value()?,
            actor,
        ))
    }

    /// Set the producer-reported timestamp.
    pub fn with_occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = Some(occurred_at);
        self
    }
}

// =============================================================================
// Correction Query
// =============================================================================

/// Filter and paging options for listing correction events.
///
/// Time bounds are half-open: `recorded_from` is inclusive,
/// `recorded_until` is exclusive.
#[derive(Debug, Clone)]
pub struct CorrectionQuery {
    /// Restrict to one stream (campaign)
    pub stream_id: Option<String>,
    /// Restrict to corrections whose target event had this kind
    pub corrected_kind: Option<String>,
    /// Lower bound on `recorded_at` (inclusive)
    pub recorded_from: Option<DateTime<Utc>>,
    /// Upper bound on `recorded_at` (exclusive)
    pub recorded_until: Option<DateTime<Utc>>,
    /// Rows to skip before the page starts
    pub offset: u64,
    /// Page size
    pub limit: u64,
}

impl CorrectionQuery {
    /// Default page size.
    pub const DEFAULT_LIMIT: u64 = 50;

    /// New query with no filters and the default page size.
    pub fn new() -> Self {
        Self {
            stream_id: None,
            corrected_kind: None,
            recorded_from: None,
            recorded_until: None,
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Restrict to one campaign's stream.
    pub fn for_campaign(mut self, campaign_id: &CampaignId) -> Self {
        self.stream_id = Some(campaign_id.to_string());
        self
    }

    /// Restrict to one stream id.
    pub fn for_stream(mut self, stream_id: impl Into<String>) -> Self {
        self.stream_id = Some(stream_id.into());
        self
    }

    /// Restrict to corrections targeting events of this kind.
    pub fn corrected_kind(mut self, kind: impl Into<String>) -> Self {
        self.corrected_kind = Some(kind.into());
        self
    }

    /// Restrict to `from <= recorded_at < until`.
    pub fn recorded_between(mut self, from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        self.recorded_from = Some(from);
        self.recorded_until = Some(until);
        self
    }

    /// Skip this many rows.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Page size.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for CorrectionQuery {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Event log errors.
#[derive(Debug, thiserror::Error)]
pub enum EventLogError {
    /// The storage adapter failed
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Payload serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored record could not be decoded
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),

    /// A correction referenced an event that is not in the stream
    #[error("Correction target not found: event {event_id} is not in stream {stream_id}")]
    CorrectionTargetNotFound {
        /// The stream that was searched
        stream_id: String,
        /// The missing target event
        event_id: EventId,
    },
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for EventLogError {
    fn from(err: sqlx::Error) -> Self {
        EventLogError::StorageUnavailable(err.to_string())
    }
}

/// Result alias for event log operations.
pub type Result<T> = std::result::Result<T, EventLogError>;
