//! Projection errors

use thiserror::Error;

/// Errors that can occur while building or maintaining projections
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Event payload doesn't match expected schema
    #[error("Invalid payload for {kind}: {reason}")]
    InvalidPayload {
        /// The event kind whose payload was rejected
        kind: String,
        /// What was wrong with it
        reason: String,
    },

    /// Event log error passthrough
    #[error("Event log error: {0}")]
    EventLog(#[from] reloop_eventlog::EventLogError),

    /// Projection store error passthrough
    #[error("Store error: {0}")]
    Store(#[from] reloop_store::StoreError),
}

/// Result type for projection operations
pub type Result<T> = std::result::Result<T, ProjectionError>;
