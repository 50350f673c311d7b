//! Validation state for a single reactive property.

use super::entry::BoundEntry;
use super::handle::{Validatable, ValidationState};
use crate::builder::PropertyOptions;
use crate::core::{
    check_all, evaluate, replace_placeholders, Rule, Setting, SharedRule, ValidationResult,
    ValueFormatter,
};
use crate::reactive::{untracked, Computed, Observable, WeakSignal};
use std::fmt;
use std::rc::{Rc, Weak};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

struct PropertySettings<V> {
    applicable: Setting<bool>,
    required: Setting<bool>,
    name: Setting<String>,
    missing_test: Rc<dyn Fn(&V) -> bool>,
    missing_failure_message: String,
    invalid_entry_failure_message: String,
    value_format: Option<String>,
    formatter: Option<Rc<dyn ValueFormatter<V>>>,
}

struct PropertyNode<V: 'static> {
    id: Uuid,
    source: WeakSignal<V>,
    settings: PropertySettings<V>,
    rules: Observable<Vec<SharedRule<V>>>,
    entry: BoundEntry,
    touched: Observable<bool>,
    paused: Observable<bool>,
    result: Computed<ValidationResult>,
    failed: Computed<bool>,
    passed: Computed<bool>,
    message: Computed<String>,
    show_message: Computed<bool>,
}

impl<V: 'static> PropertyNode<V> {
    /// Bound entry first, then the missing-value policy, then the rule chain.
    fn validate(&self) -> ValidationResult {
        let entry = self.entry.result();
        if entry.failed {
            return entry;
        }

        // The property is gone; there is nothing left to validate.
        let Some(value) = self.source.read() else {
            return ValidationResult::SUCCESS;
        };

        if (self.settings.missing_test)(&value) {
            if self.settings.required.get() {
                return ValidationResult::failure(self.settings.missing_failure_message.clone());
            }
            return entry;
        }

        evaluate(&self.rules.read(), &value)
    }

    fn formatted_value(&self) -> Option<String> {
        let formatter = self.settings.formatter.as_ref()?;
        let value = self.source.read()?;
        Some(formatter.format_value(&value, self.settings.value_format.as_deref()))
    }

    fn compose_message(&self) -> String {
        let result = self.result.read();
        if !result.failed {
            return String::new();
        }

        let name = self.settings.name.get();
        match self.formatted_value() {
            Some(value) => replace_placeholders(
                result.message(),
                &[("name", name.as_str()), ("value", value.as_str())],
            ),
            None => replace_placeholders(result.message(), &[("name", name.as_str())]),
        }
    }

    fn should_show_message(&self) -> bool {
        if !self.settings.applicable.get() {
            return false;
        }
        self.touched.read() && self.result.read().failed
    }
}

fn derive<V: 'static, T: Clone + 'static>(
    node: &Weak<PropertyNode<V>>,
    f: fn(&PropertyNode<V>) -> T,
    fallback: T,
) -> impl Fn() -> T + 'static {
    let node = node.clone();
    move || match node.upgrade() {
        Some(node) => f(&node),
        None => fallback.clone(),
    }
}

impl<V: 'static> Validatable for PropertyNode<V> {
    fn id(&self) -> Uuid {
        self.id
    }

    fn result(&self) -> ValidationResult {
        self.result.read()
    }

    fn failed(&self) -> bool {
        self.failed.read()
    }

    fn passed(&self) -> bool {
        self.passed.read()
    }

    fn message(&self) -> String {
        self.message.read()
    }

    fn touched(&self) -> bool {
        self.touched.read()
    }

    fn set_touched(&self, touched: bool) {
        self.touched.write(touched);
    }

    fn applicable(&self) -> bool {
        self.settings.applicable.get()
    }

    fn name(&self) -> String {
        self.settings.name.get()
    }

    fn refresh(&self) {
        self.message.refresh();
        self.show_message.refresh();
    }
}

/// Validation state bound to exactly one observable or computed.
///
/// Every derived signal is recomputed lazily when the property value, the
/// bound entry, the rules, `touched`, or any observable read by a dynamic
/// setting changes.
///
/// - `result`: bound-entry failure, else missing-value policy, else the
///   first failing rule, else success
/// - `message`: the failure message with `{name}` (and `{value}`, when a
///   formatter is configured) substituted
/// - `show_message`: `applicable && touched && failed`
///
/// `message` and `show_message` are pausable: while paused they keep their
/// last value, so bulk updates do not flash transient errors.
///
/// The state does not keep its property alive. Once the property is
/// dropped, the state reports success.
pub struct PropertyValidationState<V: 'static> {
    node: Rc<PropertyNode<V>>,
}

impl<V: 'static> PropertyValidationState<V> {
    pub(crate) fn new(source: WeakSignal<V>, options: PropertyOptions<V>) -> Self {
        let PropertyOptions {
            applicable,
            required,
            name,
            missing_test,
            missing_failure_message,
            invalid_entry_failure_message,
            rules,
            value_format,
            formatter,
            paused,
        } = options;
        let paused = paused.unwrap_or_else(|| Observable::new(false));

        let node = Rc::new_cyclic(|weak| PropertyNode {
            id: Uuid::new_v4(),
            source,
            settings: PropertySettings {
                applicable,
                required,
                name,
                missing_test,
                missing_failure_message,
                invalid_entry_failure_message,
                value_format,
                formatter,
            },
            rules: Observable::new(rules),
            entry: BoundEntry::new(),
            touched: Observable::new(false),
            result: Computed::deferred(derive(
                weak,
                PropertyNode::validate,
                ValidationResult::SUCCESS,
            )),
            failed: Computed::deferred(derive(weak, |node| node.result.read().failed, false)),
            passed: Computed::deferred(derive(weak, |node| !node.result.read().failed, true)),
            message: Computed::pausable(
                derive(weak, PropertyNode::compose_message, String::new()),
                paused.clone(),
            ),
            show_message: Computed::pausable(
                derive(weak, PropertyNode::should_show_message, false),
                paused.clone(),
            ),
            paused,
        });

        Self { node }
    }

    pub fn id(&self) -> Uuid {
        self.node.id
    }

    pub fn result(&self) -> ValidationResult {
        self.node.result.read()
    }

    pub fn failed(&self) -> bool {
        self.node.failed.read()
    }

    pub fn passed(&self) -> bool {
        self.node.passed.read()
    }

    pub fn message(&self) -> String {
        self.node.message.read()
    }

    /// Whether the UI should display the message right now.
    pub fn show_message(&self) -> bool {
        self.node.show_message.read()
    }

    pub fn touched(&self) -> bool {
        self.node.touched.read()
    }

    /// Mark the property as interacted with (or not). Does not re-run rules.
    pub fn set_touched(&self, touched: bool) {
        self.node.touched.write(touched);
    }

    pub fn applicable(&self) -> bool {
        self.node.settings.applicable.get()
    }

    pub fn required(&self) -> bool {
        self.node.settings.required.get()
    }

    pub fn name(&self) -> String {
        self.node.settings.name.get()
    }

    pub fn value_format(&self) -> Option<&str> {
        self.node.settings.value_format.as_deref()
    }

    /// The current value rendered by the configured formatter.
    pub fn formatted_value(&self) -> Option<String> {
        self.node.formatted_value()
    }

    /// Append a rule; it takes part in the next evaluation.
    pub fn add_rule(&self, rule: impl Rule<V> + 'static) -> &Self {
        let rule: SharedRule<V> = Rc::new(rule);
        self.node.rules.update(|rules| rules.push(rule));
        self
    }

    pub fn rules_len(&self) -> usize {
        self.node.rules.peek().len()
    }

    /// Run every rule against the current value and collect ALL failures.
    ///
    /// Missing values and the bound entry are not considered here.
    pub fn check_all_rules(&self) -> Validation<(), NonEmptyVec<String>> {
        untracked(|| match self.node.source.read() {
            Some(value) => check_all(&self.node.rules.read(), &value),
            None => Validation::success(()),
        })
    }

    pub fn bound_entry(&self) -> &BoundEntry {
        &self.node.entry
    }

    pub fn set_entry_result(&self, result: ValidationResult) {
        self.node.entry.set_result(result);
    }

    /// Report that the bound input could not be converted to a value.
    pub fn record_invalid_entry(&self) {
        let message = self.node.settings.invalid_entry_failure_message.clone();
        self.node.entry.set_result(ValidationResult::failure(message));
    }

    pub fn clear_entry(&self) {
        self.node.entry.set_result(ValidationResult::SUCCESS);
    }

    pub fn paused(&self) -> &Observable<bool> {
        &self.node.paused
    }

    /// Freeze `message` and `show_message` at their current values.
    pub fn pause(&self) {
        tracing::debug!(state = %self.node.id, "property validation paused");
        self.node.paused.write(true);
    }

    /// Unfreeze; dependents see fresh values on their next read.
    pub fn resume(&self) {
        tracing::debug!(state = %self.node.id, "property validation resumed");
        self.node.paused.write(false);
    }

    /// Recompute the pausable signals now, even while paused.
    pub fn refresh(&self) {
        Validatable::refresh(&*self.node);
    }

    /// The signal behind [`result`](Self::result), for UI bindings.
    pub fn result_signal(&self) -> &Computed<ValidationResult> {
        &self.node.result
    }

    pub fn message_signal(&self) -> &Computed<String> {
        &self.node.message
    }

    pub fn show_message_signal(&self) -> &Computed<bool> {
        &self.node.show_message
    }
}

impl<V: 'static> Clone for PropertyValidationState<V> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<V: 'static> From<PropertyValidationState<V>> for ValidationState {
    fn from(state: PropertyValidationState<V>) -> Self {
        ValidationState::Property(state.node)
    }
}

impl<V: 'static> fmt::Debug for PropertyValidationState<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyValidationState")
            .field("id", &self.node.id)
            .field("rules", &self.rules_len())
            .finish()
    }
}
