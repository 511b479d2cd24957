//! Identifiers for campaigns and events.
//!
//! ULID-backed: 26 characters of Crockford base32 with a millisecond
//! timestamp prefix, so identifiers are fixed-width, globally unique
//! without coordination, and sort lexicographically in creation order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

use crate::value_objects::DomainError;

/// Stream type under which all campaign events are recorded.
pub const CAMPAIGN_STREAM_TYPE: &str = "campaign";

// =============================================================================
// CampaignId
// =============================================================================

/// Unique identifier of a recycling campaign.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CampaignId(Ulid);

impl CampaignId {
    /// Mint a fresh identifier from the system clock.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Wrap an existing ULID.
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// The underlying ULID.
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for CampaignId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CampaignId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|e| DomainError::InvalidIdentifier(format!("{}: {}", s, e)))
    }
}

// =============================================================================
// EventId
// =============================================================================

/// Unique identifier of a recorded event.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(Ulid);

impl EventId {
    /// Mint a fresh identifier from the system clock.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Wrap an existing ULID.
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    /// The underlying ULID.
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s)
            .map(Self)
            .map_err(|e| DomainError::InvalidIdentifier(format!("{}: {}", s, e)))
    }
}

// =============================================================================
// Tests
// =============================================================================
