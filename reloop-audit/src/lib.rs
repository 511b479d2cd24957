//! Audit trail over recorded corrections
//!
//! Every correction stays in the log forever; this crate turns those
//! events into reviewable pages. Entries come straight from the log,
//! joined with the campaign reference code from the projection store
//! so a reviewer sees labels instead of raw stream ids.

#![warn(clippy::all)]

pub mod error;
pub mod reader;
pub mod types;

pub use error::{AuditError, Result};
pub use reader::AuditReader;
pub use types::{AuditEntry, AuditPage};

// Filters live next to the log; re-exported so audit callers need only
// this crate
pub use reloop_eventlog::CorrectionQuery;
