//! Reloop Projector
//!
//! Applies events from the event log to campaign projections. This is
//! the read-side of Event Sourcing - a deterministic fold over the
//! append-only log, with corrections merged in at read time instead of
//! rewriting history.

#![warn(clippy::all)]

pub mod apply;
pub mod error;
pub mod handlers;
pub mod projector;
pub mod replay;

pub use apply::{apply_event, initial_projection, project_stream};
pub use error::{ProjectionError, Result};
pub use projector::Projector;
pub use replay::{correction_overlay, replay_current_weight};
