//! Validation results.
//!
//! A result is an immutable value: either a pass, or a failure with an
//! optional message. Validation outcomes are always values, never errors.

use serde::{Deserialize, Serialize};

/// Outcome of validating a value.
///
/// All passing results are interchangeable; [`ValidationResult::SUCCESS`]
/// is the canonical one and costs no allocation.
///
/// # Example
///
/// ```rust
/// use vigil::core::ValidationResult;
///
/// let passed = ValidationResult::success();
/// assert!(!passed.failed);
/// assert_eq!(passed, ValidationResult::SUCCESS);
///
/// let failed = ValidationResult::failure("Age must be at least 18");
/// assert!(failed.failed);
/// assert_eq!(failed.message(), "Age must be at least 18");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation failed
    pub failed: bool,
    /// Failure message, if any
    pub message: Option<String>,
}

impl ValidationResult {
    /// The canonical passing result.
    pub const SUCCESS: ValidationResult = ValidationResult {
        failed: false,
        message: None,
    };

    pub const fn success() -> Self {
        Self::SUCCESS
    }

    /// A failing result carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            failed: true,
            message: Some(message.into()),
        }
    }

    pub fn passed(&self) -> bool {
        !self.failed
    }

    /// The message, or an empty string when there is none.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}
