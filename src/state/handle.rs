//! Polymorphic handle over property and model validation state.

use super::model::ModelValidationState;
use crate::core::ValidationResult;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Capabilities shared by property and model validation state.
///
/// Reads are tracked: calling these inside a computed makes the computed
/// depend on the state.
pub trait Validatable {
    /// Stable identity, used when removing states from a model.
    fn id(&self) -> Uuid;

    fn result(&self) -> ValidationResult;

    fn failed(&self) -> bool {
        self.result().failed
    }

    fn passed(&self) -> bool {
        !self.failed()
    }

    /// Display-ready failure message, empty when passing.
    fn message(&self) -> String;

    fn touched(&self) -> bool;

    fn set_touched(&self, touched: bool);

    /// Whether failures of this state are currently surfaced.
    fn applicable(&self) -> bool;

    /// Display name, as used in summaries.
    fn name(&self) -> String;

    /// Recompute pausable signals now.
    fn refresh(&self);
}

/// A validation state of either kind, as stored in attachment slots and in
/// a model's child collection.
#[derive(Clone)]
pub enum ValidationState {
    Property(Rc<dyn Validatable>),
    Model(ModelValidationState),
}

impl ValidationState {
    fn inner(&self) -> &dyn Validatable {
        match self {
            ValidationState::Property(state) => state.as_ref(),
            ValidationState::Model(state) => state,
        }
    }

    /// Model-only capabilities (children, summaries), when this is a model state.
    pub fn as_model(&self) -> Option<&ModelValidationState> {
        match self {
            ValidationState::Model(state) => Some(state),
            ValidationState::Property(_) => None,
        }
    }

    pub fn is_model(&self) -> bool {
        matches!(self, ValidationState::Model(_))
    }

    /// Same underlying state, regardless of how the handle was obtained.
    pub fn same_state(&self, other: &ValidationState) -> bool {
        self.id() == other.id()
    }
}

impl Validatable for ValidationState {
    fn id(&self) -> Uuid {
        self.inner().id()
    }

    fn result(&self) -> ValidationResult {
        self.inner().result()
    }

    fn failed(&self) -> bool {
        self.inner().failed()
    }

    fn passed(&self) -> bool {
        self.inner().passed()
    }

    fn message(&self) -> String {
        self.inner().message()
    }

    fn touched(&self) -> bool {
        self.inner().touched()
    }

    fn set_touched(&self, touched: bool) {
        self.inner().set_touched(touched);
    }

    fn applicable(&self) -> bool {
        self.inner().applicable()
    }

    fn name(&self) -> String {
        self.inner().name()
    }

    fn refresh(&self) {
        self.inner().refresh();
    }
}

impl From<ModelValidationState> for ValidationState {
    fn from(state: ModelValidationState) -> Self {
        ValidationState::Model(state)
    }
}

impl fmt::Debug for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            ValidationState::Property(_) => "Property",
            ValidationState::Model(_) => "Model",
        };
        f.debug_struct("ValidationState")
            .field("kind", &kind)
            .field("id", &self.id())
            .finish()
    }
}
