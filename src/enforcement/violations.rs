//! Reasons a requested transition should not be committed.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransitionViolation {
    #[error("Current state '{state}' is not a known repair state")]
    UnknownCurrentState { state: String },

    #[error("Target state '{state}' is not a known repair state")]
    UnknownTargetState { state: String },

    #[error("The repair is already in state '{state}'")]
    SelfTransition { state: String },

    #[error("Cannot move a repair from '{from}' to '{to}'")]
    NotAllowed { from: String, to: String },

    #[error("Moving to '{state}' requires observations")]
    MissingObservations { state: String },

    #[error("Check failed: {message}")]
    CustomCheckFailed { message: String },
}
