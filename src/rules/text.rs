//! Text rules and ad hoc predicates.

use crate::core::{replace_placeholders, Rule, ValidationResult};
use regex::Regex;

/// Fails when the character count is outside the configured bounds.
///
/// Either bound may be omitted. Placeholders: `{minimum}`, `{maximum}`.
#[derive(Clone, Debug)]
pub struct Length {
    minimum: Option<usize>,
    maximum: Option<usize>,
    message: String,
}

impl Length {
    pub fn new(minimum: Option<usize>, maximum: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            minimum,
            maximum,
            message: message.into(),
        }
    }

    pub fn at_least(minimum: usize, message: impl Into<String>) -> Self {
        Self::new(Some(minimum), None, message)
    }

    pub fn at_most(maximum: usize, message: impl Into<String>) -> Self {
        Self::new(None, Some(maximum), message)
    }
}

impl<V: AsRef<str>> Rule<V> for Length {
    fn test(&self, value: &V) -> ValidationResult {
        let count = value.as_ref().chars().count();
        let too_short = self.minimum.is_some_and(|minimum| count < minimum);
        let too_long = self.maximum.is_some_and(|maximum| count > maximum);
        if !(too_short || too_long) {
            return ValidationResult::success();
        }

        let minimum = self.minimum.map(|m| m.to_string()).unwrap_or_default();
        let maximum = self.maximum.map(|m| m.to_string()).unwrap_or_default();
        ValidationResult::failure(replace_placeholders(
            &self.message,
            &[("minimum", minimum.as_str()), ("maximum", maximum.as_str())],
        ))
    }
}

/// Fails when the text does not match a regular expression.
#[derive(Clone, Debug)]
pub struct Matches {
    pattern: Regex,
    message: String,
}

impl Matches {
    pub fn new(pattern: Regex, message: impl Into<String>) -> Self {
        Self {
            pattern,
            message: message.into(),
        }
    }

    /// Compile `pattern` and build the rule.
    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self::new(Regex::new(pattern)?, message))
    }
}

impl<V: AsRef<str>> Rule<V> for Matches {
    fn test(&self, value: &V) -> ValidationResult {
        if self.pattern.is_match(value.as_ref()) {
            ValidationResult::success()
        } else {
            ValidationResult::failure(self.message.clone())
        }
    }
}

/// A boolean test paired with the message to report when it is false.
#[derive(Clone)]
pub struct Predicate<F> {
    test: F,
    message: String,
}

impl<F> Predicate<F> {
    pub fn new(test: F, message: impl Into<String>) -> Self {
        Self {
            test,
            message: message.into(),
        }
    }
}

impl<V, F> Rule<V> for Predicate<F>
where
    F: Fn(&V) -> bool,
{
    fn test(&self, value: &V) -> ValidationResult {
        if (self.test)(value) {
            ValidationResult::success()
        } else {
            ValidationResult::failure(self.message.clone())
        }
    }
}
