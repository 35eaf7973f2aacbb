//! Transition error types.

use thiserror::Error;

/// Errors returned by rejected state changes.
///
/// A rejected request leaves the machine exactly as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("'{state}' is not a declared state")]
    InvalidState { state: String },

    #[error("No transition for event '{event}' from state '{state}'")]
    NoTransition { state: String, event: String },
}
