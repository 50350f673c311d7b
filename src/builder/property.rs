//! Builder for property validation state.

use crate::builder::error::ConfigError;
use crate::core::{MaybeMissing, Rule, Setting, SharedRule, ValueFormatter};
use crate::numeric::{FormatSpec, NumericHelper};
use crate::reactive::{Observable, Signal};
use crate::state::{Attachable, PropertyValidationState, ValidationState};
use std::rc::Rc;

/// Immutable configuration of a property validation state.
///
/// Built with [`PropertyValidationBuilder`]; fixed once attached, except
/// that rules may still be appended through
/// [`PropertyValidationState::add_rule`].
pub struct PropertyOptions<V> {
    pub(crate) applicable: Setting<bool>,
    pub(crate) required: Setting<bool>,
    pub(crate) name: Setting<String>,
    pub(crate) missing_test: Rc<dyn Fn(&V) -> bool>,
    pub(crate) missing_failure_message: String,
    pub(crate) invalid_entry_failure_message: String,
    pub(crate) rules: Vec<SharedRule<V>>,
    pub(crate) value_format: Option<String>,
    pub(crate) formatter: Option<Rc<dyn ValueFormatter<V>>>,
    pub(crate) paused: Option<Observable<bool>>,
}

/// Fluent builder for [`PropertyOptions`].
///
/// # Example
///
/// ```rust
/// use vigil::builder::PropertyValidationBuilder;
/// use vigil::reactive::Observable;
/// use vigil::rules::Minimum;
///
/// let age = Observable::new(15);
/// let validation = PropertyValidationBuilder::new()
///     .name("Age")
///     .required(true)
///     .missing_failure_message("{name} is required")
///     .rule(Minimum::new(18, "{name} must be at least {minimum}"))
///     .attach(&age)
///     .unwrap();
///
/// assert!(validation.failed());
/// assert_eq!(validation.message(), "Age must be at least 18");
///
/// age.write(21);
/// assert!(validation.passed());
/// ```
pub struct PropertyValidationBuilder<V> {
    options: PropertyOptions<V>,
    format_error: Option<ConfigError>,
}

impl<V: MaybeMissing + 'static> PropertyValidationBuilder<V> {
    /// Create a builder using [`MaybeMissing`] as the missing-value test.
    pub fn new() -> Self {
        Self::with_missing_test(|value: &V| value.is_missing())
    }
}

impl<V: MaybeMissing + 'static> Default for PropertyValidationBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> PropertyValidationBuilder<V> {
    /// Create a builder for value types without a [`MaybeMissing`] impl.
    pub fn with_missing_test(missing_test: impl Fn(&V) -> bool + 'static) -> Self {
        Self {
            options: PropertyOptions {
                applicable: Setting::Fixed(true),
                required: Setting::Fixed(false),
                name: Setting::Fixed(String::new()),
                missing_test: Rc::new(missing_test),
                missing_failure_message: String::new(),
                invalid_entry_failure_message: String::new(),
                rules: Vec::new(),
                value_format: None,
                formatter: None,
                paused: None,
            },
            format_error: None,
        }
    }

    /// Whether failures are surfaced. Defaults to `true`.
    pub fn applicable(mut self, applicable: impl Into<Setting<bool>>) -> Self {
        self.options.applicable = applicable.into();
        self
    }

    pub fn applicable_when(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.options.applicable = Setting::dynamic(f);
        self
    }

    /// Whether a missing value fails. Defaults to `false`.
    pub fn required(mut self, required: impl Into<Setting<bool>>) -> Self {
        self.options.required = required.into();
        self
    }

    pub fn required_when(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.options.required = Setting::dynamic(f);
        self
    }

    /// Display name substituted for `{name}` in messages.
    pub fn name(mut self, name: impl Into<Setting<String>>) -> Self {
        self.options.name = name.into();
        self
    }

    pub fn name_with(mut self, f: impl Fn() -> String + 'static) -> Self {
        self.options.name = Setting::dynamic(f);
        self
    }

    /// Replace the missing-value test.
    pub fn missing_test(mut self, missing_test: impl Fn(&V) -> bool + 'static) -> Self {
        self.options.missing_test = Rc::new(missing_test);
        self
    }

    pub fn missing_failure_message(mut self, message: impl Into<String>) -> Self {
        self.options.missing_failure_message = message.into();
        self
    }

    /// Message used by [`PropertyValidationState::record_invalid_entry`].
    pub fn invalid_entry_failure_message(mut self, message: impl Into<String>) -> Self {
        self.options.invalid_entry_failure_message = message.into();
        self
    }

    /// Append a rule. Rules run in the order they were added.
    pub fn rule(mut self, rule: impl Rule<V> + 'static) -> Self {
        self.options.rules.push(Rc::new(rule));
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = SharedRule<V>>) -> Self {
        self.options.rules.extend(rules);
        self
    }

    /// Format handed to the value formatter, e.g. `"C,.c"` for the numeric helper.
    pub fn value_format(mut self, format: impl Into<String>) -> Self {
        self.options.value_format = Some(format.into());
        self
    }

    /// Formatter used for `{value}` placeholders and [`PropertyValidationState::formatted_value`].
    pub fn value_formatter(mut self, formatter: impl ValueFormatter<V> + 'static) -> Self {
        self.options.formatter = Some(Rc::new(formatter));
        self
    }

    /// Observable that pauses the message and show-message signals.
    pub fn paused(mut self, paused: Observable<bool>) -> Self {
        self.options.paused = Some(paused);
        self
    }

    /// Finish configuration without attaching.
    pub fn build(self) -> Result<PropertyOptions<V>, ConfigError> {
        match self.format_error {
            Some(error) => Err(error),
            None => Ok(self.options),
        }
    }

    /// Build and attach to `target`.
    pub fn attach<S>(self, target: &S) -> Result<PropertyValidationState<V>, ConfigError>
    where
        S: Signal<V> + Attachable,
    {
        attach_validation(target, self.build()?)
    }
}

impl<V> PropertyValidationBuilder<V>
where
    V: 'static,
    NumericHelper: ValueFormatter<V>,
{
    /// Format values with `helper` using a numeric format spec.
    ///
    /// An invalid spec is reported when the builder is built.
    pub fn numeric_format(mut self, helper: NumericHelper, format: impl Into<String>) -> Self {
        let format = format.into();
        if FormatSpec::parse(&format).is_none() {
            self.format_error = Some(ConfigError::InvalidValueFormat {
                reason: "expected [C][,][.digits|.c]".to_string(),
                format: format.clone(),
            });
        }
        self.options.value_format = Some(format);
        self.options.formatter = Some(Rc::new(helper));
        self
    }
}

/// Attach validation to an observable or computed.
///
/// Fails if the target already has validation state; use
/// [`set_validation_state`](crate::state::set_validation_state) to replace it.
pub fn attach_validation<V, S>(
    target: &S,
    options: PropertyOptions<V>,
) -> Result<PropertyValidationState<V>, ConfigError>
where
    V: 'static,
    S: Signal<V> + Attachable,
{
    if target.validation_slot().is_occupied() {
        return Err(ConfigError::AlreadyAttached { target: "Property" });
    }

    let state = PropertyValidationState::new(target.downgrade(), options);
    target
        .validation_slot()
        .set(ValidationState::from(state.clone()));

    tracing::debug!(state = %state.id(), rules = state.rules_len(), "property validation attached");
    Ok(state)
}
