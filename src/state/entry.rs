//! Bound-entry channel: the outcome of converting user input.

use crate::core::ValidationResult;
use crate::reactive::Observable;

/// Side channel fed by input conversion (e.g. text that could not be parsed
/// as the property's type).
///
/// A failing entry result takes priority over every other check, because a
/// value that could not be converted cannot be meaningfully rule-checked.
#[derive(Clone, Debug)]
pub struct BoundEntry {
    focused: Observable<bool>,
    result: Observable<ValidationResult>,
}

impl BoundEntry {
    pub(crate) fn new() -> Self {
        Self {
            focused: Observable::new(false),
            result: Observable::new(ValidationResult::SUCCESS),
        }
    }

    pub fn result(&self) -> ValidationResult {
        self.result.read()
    }

    pub fn set_result(&self, result: ValidationResult) {
        self.result.write(result);
    }

    /// Whether the bound input currently has focus.
    pub fn focused(&self) -> bool {
        self.focused.read()
    }

    pub fn set_focused(&self, focused: bool) {
        self.focused.write(focused);
    }
}
