//! Validation state for a composite model.

use super::attach::Attachable;
use super::handle::{Validatable, ValidationState};
use super::summary::SummaryEntry;
use crate::builder::{ConfigError, ModelOptions};
use crate::core::{Setting, ValidationResult};
use crate::discovery::{find_validation_states, Discovery, ModelGraph};
use crate::reactive::{untracked, Computed, Observable};
use chrono::{DateTime, Utc};
use std::fmt;
use std::rc::{Rc, Weak};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

struct ModelSettings {
    applicable: Setting<bool>,
    name: Setting<String>,
    failure_message_format: String,
}

struct ModelNode {
    id: Uuid,
    model: Option<Weak<dyn ModelGraph>>,
    settings: ModelSettings,
    validation_states: Observable<Vec<ValidationState>>,
    summary: Observable<Vec<SummaryEntry>>,
    summary_updated_at: Observable<Option<DateTime<Utc>>>,
    paused: Observable<bool>,
    invalid_states: Computed<Vec<ValidationState>>,
    result: Computed<ValidationResult>,
    failed: Computed<bool>,
    passed: Computed<bool>,
    message: Computed<String>,
    touched: Computed<bool>,
}

impl ModelNode {
    fn collect_invalid_states(&self) -> Vec<ValidationState> {
        self.validation_states
            .read()
            .into_iter()
            .filter(|state| state.applicable() && state.result().failed)
            .collect()
    }

    fn aggregate_result(&self) -> ValidationResult {
        if self.invalid_states.read().is_empty() {
            ValidationResult::SUCCESS
        } else {
            ValidationResult::failure(self.settings.failure_message_format.clone())
        }
    }

    fn any_touched(&self) -> bool {
        self.validation_states
            .read()
            .iter()
            .any(|state| state.touched())
    }
}

fn derive<T: Clone + 'static>(
    node: &Weak<ModelNode>,
    f: fn(&ModelNode) -> T,
    fallback: T,
) -> impl Fn() -> T + 'static {
    let node = node.clone();
    move || match node.upgrade() {
        Some(node) => f(&node),
        None => fallback.clone(),
    }
}

/// Validation state aggregated over a model's child states.
///
/// Children are property or model states, kept in insertion order. The
/// aggregate fails as soon as one applicable child fails; its message is
/// the model-level `failure_message_format`, while per-child detail is
/// available through [`invalid_states`](Self::invalid_states) and the
/// pull-based [`summary`](Self::summary).
///
/// `result` is pausable through the `paused` observable, so a host can load
/// a model in bulk and [`refresh`](Self::refresh) once afterwards.
///
/// # Example
///
/// ```rust
/// use vigil::builder::{ModelValidationBuilder, PropertyValidationBuilder};
/// use vigil::reactive::Observable;
/// use vigil::rules::Minimum;
/// use vigil::state::Validatable;
///
/// let age = Observable::new(15);
/// let name = Observable::new("Ada".to_string());
///
/// let form = ModelValidationBuilder::new()
///     .failure_message_format("Please correct the highlighted fields")
///     .standalone();
/// form.add_validation_states([
///     PropertyValidationBuilder::new()
///         .name("Age")
///         .rule(Minimum::new(18, "{name} must be at least {minimum}"))
///         .attach(&age)
///         .unwrap()
///         .into(),
///     PropertyValidationBuilder::new()
///         .name("Name")
///         .required(true)
///         .attach(&name)
///         .unwrap()
///         .into(),
/// ]);
///
/// assert!(form.failed());
/// form.update_summary(false);
/// assert_eq!(form.summary().len(), 1);
/// assert_eq!(form.summary()[0].message, "Age must be at least 18");
///
/// form.set_touched(true);
/// assert!(form.validation_states().iter().all(|state| state.touched()));
/// ```
#[derive(Clone)]
pub struct ModelValidationState {
    node: Rc<ModelNode>,
}

impl ModelValidationState {
    pub(crate) fn new(model: Option<Weak<dyn ModelGraph>>, options: ModelOptions) -> Self {
        let ModelOptions {
            applicable,
            name,
            failure_message_format,
            paused,
        } = options;
        let paused = paused.unwrap_or_else(|| Observable::new(false));

        let node = Rc::new_cyclic(|weak| ModelNode {
            id: Uuid::new_v4(),
            model,
            settings: ModelSettings {
                applicable,
                name,
                failure_message_format,
            },
            validation_states: Observable::new(Vec::new()),
            summary: Observable::new(Vec::new()),
            summary_updated_at: Observable::new(None),
            invalid_states: Computed::deferred(derive(
                weak,
                ModelNode::collect_invalid_states,
                Vec::new(),
            )),
            result: Computed::pausable(
                derive(weak, ModelNode::aggregate_result, ValidationResult::SUCCESS),
                paused.clone(),
            ),
            failed: Computed::deferred(derive(weak, |node| node.result.read().failed, false)),
            passed: Computed::deferred(derive(weak, |node| !node.result.read().failed, true)),
            message: Computed::deferred(derive(
                weak,
                |node| node.result.read().message().to_string(),
                String::new(),
            )),
            touched: Computed::deferred(derive(weak, ModelNode::any_touched, false)),
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

    /// The model-level failure message, empty when passing.
    pub fn message(&self) -> String {
        self.node.message.read()
    }

    /// Applicable children whose result is failing, in collection order.
    pub fn invalid_states(&self) -> Vec<ValidationState> {
        self.node.invalid_states.read()
    }

    /// Whether any child has been touched.
    pub fn touched(&self) -> bool {
        self.node.touched.read()
    }

    /// Set `touched` on every child, e.g. when a submit is attempted.
    pub fn set_touched(&self, touched: bool) {
        for state in self.node.validation_states.peek() {
            state.set_touched(touched);
        }
    }

    pub fn applicable(&self) -> bool {
        self.node.settings.applicable.get()
    }

    pub fn name(&self) -> String {
        self.node.settings.name.get()
    }

    pub fn failure_message_format(&self) -> &str {
        &self.node.settings.failure_message_format
    }

    pub fn validation_states(&self) -> Vec<ValidationState> {
        self.node.validation_states.read()
    }

    /// Append child states. Duplicates are kept.
    pub fn add_validation_states(
        &self,
        states: impl IntoIterator<Item = ValidationState>,
    ) -> &Self {
        let states: Vec<ValidationState> = states.into_iter().collect();
        let added = states.len();
        self.node.validation_states.update(|current| current.extend(states));
        tracing::debug!(state = %self.node.id, added, "validation states added");
        self
    }

    /// Remove every occurrence of each given state. The removed states keep working.
    pub fn remove_validation_states(&self, states: &[ValidationState]) -> &Self {
        let mut removed = 0;
        self.node.validation_states.update(|current| {
            let before = current.len();
            current.retain(|existing| !states.iter().any(|state| state.same_state(existing)));
            removed = before - current.len();
        });
        tracing::debug!(state = %self.node.id, removed, "validation states removed");
        self
    }

    /// Stop validating the children of a validatable sub-model as part of this model.
    pub fn stop_validating_sub_model(&self, sub_model: &(impl Attachable + ?Sized)) -> &Self {
        let Some(state) = sub_model.validation_slot().get() else {
            return self;
        };
        if let Some(model_state) = state.as_model() {
            let children = model_state.node.validation_states.peek();
            self.remove_validation_states(&children);
        }
        self
    }

    /// Append the states found in the model graph under `policy`.
    ///
    /// Repeated calls append again; nothing is deduplicated.
    pub fn discover(&self, policy: Discovery) -> Result<usize, ConfigError> {
        let model = self
            .node
            .model
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(ConfigError::ModelUnavailable)?;

        let found = untracked(|| {
            find_validation_states(
                model.as_ref(),
                policy.include_sub_models(),
                policy.recurse(),
            )
        });
        let count = found.len();
        tracing::debug!(state = %self.node.id, ?policy, found = count, "validation states discovered");
        self.add_validation_states(found);
        Ok(count)
    }

    /// Everything: properties and sub-models, recursively.
    pub fn validate_all(&self) -> Result<usize, ConfigError> {
        self.discover(Discovery::All)
    }

    /// Properties of this model and of all descendants, but no sub-model states.
    pub fn validate_all_properties(&self) -> Result<usize, ConfigError> {
        self.discover(Discovery::AllProperties)
    }

    /// Only this model's own properties.
    pub fn validate_my_properties(&self) -> Result<usize, ConfigError> {
        self.discover(Discovery::MyProperties)
    }

    /// This model's own properties and direct sub-models.
    pub fn validate_my_properties_and_sub_models(&self) -> Result<usize, ConfigError> {
        self.discover(Discovery::MyPropertiesAndSubModels)
    }

    /// Snapshot the invalid children into the summary.
    ///
    /// Names and messages are read now and not kept live. With
    /// `include_children`, child model states update their own summaries too.
    pub fn update_summary(&self, include_children: bool) -> &Self {
        let entries: Vec<SummaryEntry> = untracked(|| {
            self.node
                .invalid_states
                .peek()
                .iter()
                .map(|state| SummaryEntry::new(state.name(), state.message()))
                .collect()
        });
        tracing::debug!(state = %self.node.id, failures = entries.len(), "summary updated");
        self.node.summary.write(entries);
        self.node.summary_updated_at.write(Some(Utc::now()));

        if include_children {
            for state in self.node.validation_states.peek() {
                if let Some(model) = state.as_model() {
                    model.update_summary(false);
                }
            }
        }
        self
    }

    /// Empty the summary, and with `include_children` those of child model states.
    pub fn clear_summary(&self, include_children: bool) -> &Self {
        self.node.summary.write(Vec::new());
        self.node.summary_updated_at.write(None);
        tracing::debug!(state = %self.node.id, "summary cleared");

        if include_children {
            for state in self.node.validation_states.peek() {
                if let Some(model) = state.as_model() {
                    model.clear_summary(false);
                }
            }
        }
        self
    }

    pub fn summary(&self) -> Vec<SummaryEntry> {
        self.node.summary.read()
    }

    /// When the summary was last taken; `None` if never or since cleared.
    pub fn summary_updated_at(&self) -> Option<DateTime<Utc>> {
        self.node.summary_updated_at.read()
    }

    /// ALL current failures, accumulated rather than reduced to one result.
    pub fn failures(&self) -> Validation<(), NonEmptyVec<SummaryEntry>> {
        let checks: Vec<_> = self
            .invalid_states()
            .iter()
            .map(|state| Validation::fail(SummaryEntry::new(state.name(), state.message())))
            .collect();
        Validation::<(), NonEmptyVec<SummaryEntry>>::all_vec(checks).map(|_| ())
    }

    pub fn paused(&self) -> &Observable<bool> {
        &self.node.paused
    }

    /// Freeze `result` at its current value.
    pub fn pause(&self) {
        tracing::debug!(state = %self.node.id, "model validation paused");
        self.node.paused.write(true);
    }

    pub fn resume(&self) {
        tracing::debug!(state = %self.node.id, "model validation resumed");
        self.node.paused.write(false);
    }

    /// Recompute `result` now, even while paused.
    pub fn refresh(&self) {
        self.node.result.refresh();
    }

    pub fn result_signal(&self) -> &Computed<ValidationResult> {
        &self.node.result
    }
}

impl Validatable for ModelValidationState {
    fn id(&self) -> Uuid {
        self.node.id
    }

    fn result(&self) -> ValidationResult {
        ModelValidationState::result(self)
    }

    fn failed(&self) -> bool {
        ModelValidationState::failed(self)
    }

    fn passed(&self) -> bool {
        ModelValidationState::passed(self)
    }

    fn message(&self) -> String {
        ModelValidationState::message(self)
    }

    fn touched(&self) -> bool {
        ModelValidationState::touched(self)
    }

    fn set_touched(&self, touched: bool) {
        ModelValidationState::set_touched(self, touched);
    }

    fn applicable(&self) -> bool {
        ModelValidationState::applicable(self)
    }

    fn name(&self) -> String {
        ModelValidationState::name(self)
    }

    fn refresh(&self) {
        ModelValidationState::refresh(self);
    }
}

impl fmt::Debug for ModelValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelValidationState")
            .field("id", &self.node.id)
            .field("children", &self.node.validation_states.peek().len())
            .finish()
    }
}
