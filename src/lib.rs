//! Vigil: reactive validation state for observable properties and models
//!
//! Validation is attached to the values a host already observes. Every
//! derived piece of state (result, message, touched, model aggregation) is a
//! computed signal, so it stays current as values change and can be bound to
//! a UI without manual re-validation.
//!
//! # Core Concepts
//!
//! - **Property validation**: missing-value policy, then an ordered rule chain
//! - **Model validation**: aggregation over property and sub-model states
//! - **Rules**: pure tests of a value returning a [`ValidationResult`]
//! - **Discovery**: collecting states from a host model's members
//! - **Pausing**: freezing derived results during bulk updates
//!
//! # Example
//!
//! ```rust
//! use vigil::builder::{ModelValidationBuilder, PropertyValidationBuilder};
//! use vigil::reactive::Observable;
//! use vigil::rules::Minimum;
//! use vigil::state::Validatable;
//!
//! let name = Observable::new(String::new());
//! let age = Observable::new(15);
//!
//! let name_validation = PropertyValidationBuilder::new()
//!     .name("Name")
//!     .required(true)
//!     .missing_failure_message("{name} is required")
//!     .attach(&name)
//!     .unwrap();
//! let age_validation = PropertyValidationBuilder::new()
//!     .name("Age")
//!     .rule(Minimum::new(18, "{name} must be at least {minimum}"))
//!     .attach(&age)
//!     .unwrap();
//!
//! let form = ModelValidationBuilder::new()
//!     .failure_message_format("Please fix the highlighted fields")
//!     .standalone();
//! form.add_validation_states([name_validation.clone().into(), age_validation.into()]);
//!
//! // Nothing has been touched yet, so no messages are shown.
//! assert!(form.failed());
//! assert!(!name_validation.show_message());
//!
//! // A submit attempt touches everything.
//! form.set_touched(true);
//! assert!(name_validation.show_message());
//! assert_eq!(name_validation.message(), "Name is required");
//!
//! name.write("Ada".to_string());
//! age.write(36);
//! assert!(form.passed());
//! ```

pub mod builder;
pub mod core;
pub mod discovery;
pub mod numeric;
pub mod reactive;
pub mod rules;
pub mod state;

pub use builder::{
    attach_validation, validatable_model, ConfigError, ModelValidationBuilder,
    PropertyValidationBuilder,
};
pub use crate::core::{Rule, ValidationResult};
pub use discovery::{find_validation_states, Discovery, Member, ModelGraph};
pub use numeric::{NumericError, NumericHelper, NumericSettings};
pub use reactive::{Computed, Observable, Signal};
pub use state::{
    get_validation_state, has_validation_state, set_validation_state, Attachable,
    ModelValidationState, PropertyValidationState, Validatable, ValidationSlot, ValidationState,
};
