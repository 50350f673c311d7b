//! Rules: pure tests of a value.
//!
//! A rule looks only at the value it is given and its own configuration.
//! It never reads reactive state, so a property re-validates exactly when
//! its value (or its validation settings) change.

use super::result::ValidationResult;
use std::rc::Rc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// A pure test of a value.
///
/// Any closure `Fn(&V) -> ValidationResult` is a rule.
///
/// # Example
///
/// ```rust
/// use vigil::core::{Rule, ValidationResult};
///
/// let even = |value: &i32| {
///     if value % 2 == 0 {
///         ValidationResult::success()
///     } else {
///         ValidationResult::failure("{name} must be even")
///     }
/// };
///
/// assert!(even.test(&4).passed());
/// assert!(even.test(&3).failed);
/// ```
pub trait Rule<V> {
    fn test(&self, value: &V) -> ValidationResult;
}

impl<V, F> Rule<V> for F
where
    F: Fn(&V) -> ValidationResult,
{
    fn test(&self, value: &V) -> ValidationResult {
        self(value)
    }
}

/// Shared, type-erased rule as stored by property validation state.
pub type SharedRule<V> = Rc<dyn Rule<V>>;

/// Run `rules` in order and return the first failure, or success.
pub fn evaluate<V>(rules: &[SharedRule<V>], value: &V) -> ValidationResult {
    rules
        .iter()
        .map(|rule| rule.test(value))
        .find(|result| result.failed)
        .unwrap_or(ValidationResult::SUCCESS)
}

/// Run every rule and accumulate ALL failure messages.
///
/// Unlike [`evaluate`], this does not stop at the first failure. It is meant
/// for diagnostics; property state itself always reports the first failure.
pub fn check_all<V>(rules: &[SharedRule<V>], value: &V) -> Validation<(), NonEmptyVec<String>> {
    let checks: Vec<_> = rules
        .iter()
        .map(|rule| {
            let result = rule.test(value);
            if result.failed {
                Validation::fail(result.message().to_string())
            } else {
                Validation::success(())
            }
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn at_least(min: i32, message: &'static str) -> SharedRule<i32> {
        Rc::new(move |value: &i32| {
            if *value >= min {
                ValidationResult::success()
            } else {
                ValidationResult::failure(message)
            }
        })
    }

    #[test]
    fn empty_chain_passes() {
        assert_eq!(evaluate::<i32>(&[], &1), ValidationResult::SUCCESS);
    }

    #[test]
    fn first_failure_wins() {
        let rules = vec![at_least(10, "ten"), at_least(20, "twenty")];
        assert_eq!(evaluate(&rules, &5).message(), "ten");
        assert_eq!(evaluate(&rules, &15).message(), "twenty");
        assert!(evaluate(&rules, &25).passed());
    }

    #[test]
    fn evaluation_short_circuits() {
        let calls = Rc::new(Cell::new(0));
        let counting: SharedRule<i32> = {
            let calls = Rc::clone(&calls);
            Rc::new(move |_: &i32| {
                calls.set(calls.get() + 1);
                ValidationResult::success()
            })
        };
        let rules = vec![at_least(10, "ten"), counting];

        evaluate(&rules, &1);
        assert_eq!(calls.get(), 0);

        evaluate(&rules, &11);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn check_all_accumulates_all_failures() {
        let rules = vec![at_least(10, "ten"), at_least(20, "twenty")];

        match check_all(&rules, &5) {
            Validation::Failure(messages) => {
                assert_eq!(messages.len(), 2);
                let messages: Vec<_> = messages.iter().cloned().collect();
                assert_eq!(messages, vec!["ten".to_string(), "twenty".to_string()]);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }

        assert!(check_all(&rules, &25).is_success());
    }
}
