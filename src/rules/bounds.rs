//! Ordering bounds.

use crate::core::{replace_placeholders, Rule, ValidationResult};
use std::fmt::Display;

/// Fails when the value is below `minimum`.
#[derive(Clone, Debug)]
pub struct Minimum<T> {
    minimum: T,
    message: String,
}

impl<T> Minimum<T> {
    pub fn new(minimum: T, message: impl Into<String>) -> Self {
        Self {
            minimum,
            message: message.into(),
        }
    }
}

impl<T: PartialOrd + Display> Rule<T> for Minimum<T> {
    fn test(&self, value: &T) -> ValidationResult {
        if *value < self.minimum {
            let minimum = self.minimum.to_string();
            ValidationResult::failure(replace_placeholders(
                &self.message,
                &[("minimum", minimum.as_str())],
            ))
        } else {
            ValidationResult::success()
        }
    }
}

/// Fails when the value is above `maximum`.
#[derive(Clone, Debug)]
pub struct Maximum<T> {
    maximum: T,
    message: String,
}

impl<T> Maximum<T> {
    pub fn new(maximum: T, message: impl Into<String>) -> Self {
        Self {
            maximum,
            message: message.into(),
        }
    }
}

impl<T: PartialOrd + Display> Rule<T> for Maximum<T> {
    fn test(&self, value: &T) -> ValidationResult {
        if *value > self.maximum {
            let maximum = self.maximum.to_string();
            ValidationResult::failure(replace_placeholders(
                &self.message,
                &[("maximum", maximum.as_str())],
            ))
        } else {
            ValidationResult::success()
        }
    }
}

/// Fails when the value is outside `minimum..=maximum`.
#[derive(Clone, Debug)]
pub struct Range<T> {
    minimum: T,
    maximum: T,
    message: String,
}

impl<T> Range<T> {
    pub fn new(minimum: T, maximum: T, message: impl Into<String>) -> Self {
        Self {
            minimum,
            maximum,
            message: message.into(),
        }
    }
}

impl<T: PartialOrd + Display> Rule<T> for Range<T> {
    fn test(&self, value: &T) -> ValidationResult {
        if *value < self.minimum || *value > self.maximum {
            let (minimum, maximum) = (self.minimum.to_string(), self.maximum.to_string());
            ValidationResult::failure(replace_placeholders(
                &self.message,
                &[("minimum", minimum.as_str()), ("maximum", maximum.as_str())],
            ))
        } else {
            ValidationResult::success()
        }
    }
}
