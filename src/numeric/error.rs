//! Numeric helper errors.

use thiserror::Error;

/// Errors from [`NumericHelper`](super::NumericHelper).
#[derive(Debug, Error)]
pub enum NumericError {
    #[error("{input:?} is not a number")]
    NotNumeric { input: String },

    #[error("Invalid numeric settings: {reason}")]
    InvalidSettings { reason: String },

    #[error("Failed to build numeric pattern: {0}")]
    Pattern(#[from] regex::Error),
}
