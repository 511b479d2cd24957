//! Audit query errors

use thiserror::Error;

/// Errors that can occur while reading the audit trail
#[derive(Debug, Error)]
pub enum AuditError {
    /// Event log error passthrough
    #[error("Event log error: {0}")]
    EventLog(#[from] reloop_eventlog::EventLogError),

    /// Projection store error passthrough
    #[error("Store error: {0}")]
    Store(#[from] reloop_store::StoreError),
}

/// Result type for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
