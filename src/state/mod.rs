//! Validation state objects.
//!
//! - [`PropertyValidationState`]: validation of one observable value
//! - [`ModelValidationState`]: aggregation over child states
//! - [`ValidationState`]: either kind, as stored on targets and in models
//!
//! States are attached to targets through the [`Attachable`] slot and can
//! be recovered from the target with [`get_validation_state`].

mod attach;
mod entry;
mod handle;
mod model;
mod property;
mod summary;

pub use attach::{
    get_validation_state, has_validation_state, set_validation_state, Attachable, ValidationSlot,
};
pub use entry::BoundEntry;
pub use handle::{Validatable, ValidationState};
pub use model::ModelValidationState;
pub use property::PropertyValidationState;
pub use summary::SummaryEntry;
