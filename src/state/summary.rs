//! Failure summary entries.

use serde::{Deserialize, Serialize};

/// One line of a model's failure summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// Display name of the failing state
    pub name: String,
    /// Its message at the time the summary was taken
    pub message: String,
}

impl SummaryEntry {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}
