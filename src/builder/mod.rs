//! Fluent builders for attaching validation.
//!
//! Options are collected by consuming builders and frozen into immutable
//! option structs when the state is attached.

pub mod error;
pub mod model;
pub mod property;

pub use error::ConfigError;
pub use model::{validatable_model, ModelOptions, ModelValidationBuilder};
pub use property::{attach_validation, PropertyOptions, PropertyValidationBuilder};
