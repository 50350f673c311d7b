//! The attachment protocol.
//!
//! Every validatable target (observable, computed, or host model) exposes a
//! single [`ValidationSlot`]. Generic code such as UI bindings or the model
//! walker reads the slot without knowing the target's concrete type.

use super::handle::ValidationState;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Storage for the validation state attached to a target.
#[derive(Default)]
pub struct ValidationSlot {
    state: RefCell<Option<ValidationState>>,
}

impl ValidationSlot {
    pub fn get(&self) -> Option<ValidationState> {
        self.state.borrow().clone()
    }

    pub fn set(&self, state: ValidationState) {
        *self.state.borrow_mut() = Some(state);
    }

    pub fn is_occupied(&self) -> bool {
        self.state.borrow().is_some()
    }
}

impl fmt::Debug for ValidationSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationSlot")
            .field("occupied", &self.is_occupied())
            .finish()
    }
}

/// A target that validation state can be attached to.
///
/// Observables and computeds implement this already. Host models implement
/// it by embedding a [`ValidationSlot`]:
///
/// ```rust
/// use vigil::state::{Attachable, ValidationSlot};
///
/// #[derive(Default)]
/// struct Person {
///     validation: ValidationSlot,
/// }
///
/// impl Attachable for Person {
///     fn validation_slot(&self) -> &ValidationSlot {
///         &self.validation
///     }
/// }
/// ```
pub trait Attachable {
    fn validation_slot(&self) -> &ValidationSlot;
}

impl<T: Attachable + ?Sized> Attachable for Rc<T> {
    fn validation_slot(&self) -> &ValidationSlot {
        (**self).validation_slot()
    }
}

/// Validation state attached to `target`, if any.
pub fn get_validation_state(target: &(impl Attachable + ?Sized)) -> Option<ValidationState> {
    target.validation_slot().get()
}

/// Attach `state` to `target`, replacing whatever was there.
pub fn set_validation_state(target: &(impl Attachable + ?Sized), state: ValidationState) {
    target.validation_slot().set(state);
}

pub fn has_validation_state(target: &(impl Attachable + ?Sized)) -> bool {
    target.validation_slot().is_occupied()
}
