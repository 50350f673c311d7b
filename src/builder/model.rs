//! Builder for model validation state.

use crate::builder::error::ConfigError;
use crate::core::Setting;
use crate::discovery::ModelGraph;
use crate::reactive::Observable;
use crate::state::{Attachable, ModelValidationState, ValidationState};
use std::rc::{Rc, Weak};

/// Immutable configuration of a model validation state.
pub struct ModelOptions {
    pub(crate) applicable: Setting<bool>,
    pub(crate) name: Setting<String>,
    pub(crate) failure_message_format: String,
    pub(crate) paused: Option<Observable<bool>>,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            applicable: Setting::Fixed(true),
            name: Setting::Fixed("(?)".to_string()),
            failure_message_format: String::new(),
            paused: None,
        }
    }
}

/// Fluent builder for [`ModelOptions`].
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use vigil::builder::{ModelValidationBuilder, PropertyValidationBuilder};
/// use vigil::discovery::{Member, ModelGraph};
/// use vigil::reactive::Observable;
/// use vigil::state::{Attachable, ValidationSlot};
///
/// struct Person {
///     name: Observable<String>,
///     validation: ValidationSlot,
/// }
///
/// impl ModelGraph for Person {
///     fn members(&self) -> Vec<Member> {
///         vec![Member::property(&self.name)]
///     }
/// }
///
/// impl Attachable for Person {
///     fn validation_slot(&self) -> &ValidationSlot {
///         &self.validation
///     }
/// }
///
/// let person = Rc::new(Person {
///     name: Observable::new(String::new()),
///     validation: ValidationSlot::default(),
/// });
/// PropertyValidationBuilder::new()
///     .name("Name")
///     .required(true)
///     .missing_failure_message("{name} is required")
///     .attach(&person.name)
///     .unwrap();
///
/// let validation = ModelValidationBuilder::new()
///     .name("Person")
///     .failure_message_format("Please fix the errors below")
///     .attach(&person)
///     .unwrap();
/// validation.validate_all().unwrap();
///
/// assert!(validation.failed());
/// assert_eq!(validation.message(), "Please fix the errors below");
/// ```
#[derive(Default)]
pub struct ModelValidationBuilder {
    options: ModelOptions,
}

impl ModelValidationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this model's failures count in a parent model. Defaults to `true`.
    pub fn applicable(mut self, applicable: impl Into<Setting<bool>>) -> Self {
        self.options.applicable = applicable.into();
        self
    }

    pub fn applicable_when(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.options.applicable = Setting::dynamic(f);
        self
    }

    /// Display name. Defaults to `"(?)"`.
    pub fn name(mut self, name: impl Into<Setting<String>>) -> Self {
        self.options.name = name.into();
        self
    }

    pub fn name_with(mut self, f: impl Fn() -> String + 'static) -> Self {
        self.options.name = Setting::dynamic(f);
        self
    }

    /// Message of the aggregate result when any child fails.
    pub fn failure_message_format(mut self, message: impl Into<String>) -> Self {
        self.options.failure_message_format = message.into();
        self
    }

    /// Observable that pauses the aggregate result.
    pub fn paused(mut self, paused: Observable<bool>) -> Self {
        self.options.paused = Some(paused);
        self
    }

    pub fn build(self) -> ModelOptions {
        self.options
    }

    /// Build and attach to `model`.
    pub fn attach<M>(self, model: &Rc<M>) -> Result<ModelValidationState, ConfigError>
    where
        M: ModelGraph + Attachable + 'static,
    {
        validatable_model(model, self.options)
    }

    /// Build a model state that is not attached to any model.
    ///
    /// Children are added with
    /// [`add_validation_states`](ModelValidationState::add_validation_states);
    /// discovery is unavailable.
    pub fn standalone(self) -> ModelValidationState {
        let state = ModelValidationState::new(None, self.options);
        tracing::debug!(state = %state.id(), "standalone model validation created");
        state
    }
}

/// Attach model validation to `model`.
///
/// The state holds the model weakly; the model's slot holds the state.
/// Nothing is discovered yet, call one of the discovery methods on the
/// returned state.
pub fn validatable_model<M>(
    model: &Rc<M>,
    options: ModelOptions,
) -> Result<ModelValidationState, ConfigError>
where
    M: ModelGraph + Attachable + 'static,
{
    if model.validation_slot().is_occupied() {
        return Err(ConfigError::AlreadyAttached { target: "Model" });
    }

    let weak: Weak<M> = Rc::downgrade(model);
    let graph: Weak<dyn ModelGraph> = weak;
    let state = ModelValidationState::new(Some(graph), options);
    model
        .validation_slot()
        .set(ValidationState::from(state.clone()));

    tracing::debug!(state = %state.id(), "model validation attached");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::Member;
    use crate::state::{get_validation_state, Validatable, ValidationSlot};

    #[derive(Default)]
    struct Empty {
        validation: ValidationSlot,
    }

    impl ModelGraph for Empty {
        fn members(&self) -> Vec<Member> {
            Vec::new()
        }
    }

    impl Attachable for Empty {
        fn validation_slot(&self) -> &ValidationSlot {
            &self.validation
        }
    }

    #[test]
    fn defaults() {
        let state = ModelValidationBuilder::new().standalone();
        assert_eq!(state.name(), "(?)");
        assert!(state.applicable());
        assert_eq!(state.failure_message_format(), "");
        assert!(!state.paused().peek());
    }

    #[test]
    fn attach_registers_model_state() {
        let model = Rc::new(Empty::default());
        let state = ModelValidationBuilder::new()
            .name("Empty")
            .attach(&model)
            .unwrap();

        let found = get_validation_state(&model).unwrap();
        assert!(found.is_model());
        assert_eq!(found.id(), state.id());
        assert_eq!(state.validate_all(), Ok(0));
    }

    #[test]
    fn attaching_twice_fails_fast() {
        let model = Rc::new(Empty::default());
        ModelValidationBuilder::new().attach(&model).unwrap();

        let error = ModelValidationBuilder::new().attach(&model).unwrap_err();
        assert_eq!(error, ConfigError::AlreadyAttached { target: "Model" });
    }

    #[test]
    fn dropped_model_is_unavailable_for_discovery() {
        let model = Rc::new(Empty::default());
        let state = ModelValidationBuilder::new().attach(&model).unwrap();
        drop(model);

        assert_eq!(state.validate_my_properties(), Err(ConfigError::ModelUnavailable));
    }

    #[test]
    fn shared_pause_switch() {
        let paused = Observable::new(true);
        let state = ModelValidationBuilder::new()
            .paused(paused.clone())
            .standalone();

        assert!(state.paused().peek());
        paused.write(false);
        assert!(!state.paused().peek());
    }
}
