//! Configuration errors for validation builders.

use thiserror::Error;

/// Errors that can occur when attaching or configuring validation state.
///
/// These are the only errors the engine produces; validation outcomes are
/// always [`ValidationResult`](crate::core::ValidationResult) values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{target} already has validation state attached. Use set_validation_state to replace it")]
    AlreadyAttached { target: &'static str },

    #[error("Model is no longer available. Discovery needs the model the state was attached to")]
    ModelUnavailable,

    #[error("Invalid value format {format:?}: {reason}")]
    InvalidValueFormat { format: String, reason: String },
}
