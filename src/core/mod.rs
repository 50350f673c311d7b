//! Core validation types and logic.
//!
//! This module contains the pure part of the engine:
//! - [`ValidationResult`] values
//! - the [`Rule`] trait and rule-chain evaluation
//! - [`Setting`]s that are fixed or computed on demand
//! - message placeholder substitution and missing-value classification
//!
//! Nothing here knows about observables or validation state.

mod formatter;
mod missing;
mod placeholders;
mod result;
mod rule;
mod setting;

pub use formatter::ValueFormatter;
pub use missing::MaybeMissing;
pub use placeholders::replace_placeholders;
pub use result::ValidationResult;
pub use rule::{check_all, evaluate, Rule, SharedRule};
pub use setting::Setting;
