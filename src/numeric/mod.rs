//! Numeric string helper.
//!
//! Formats numbers for display and parses what users type back, for a
//! configurable decimal separator, thousands separator and currency sign.
//! Used by property validation as a value formatter and for entry parsing
//! in bindings.

mod error;
mod format;
mod helper;

pub use error::NumericError;
pub use format::{DecimalPlaces, FormatSpec, MAX_DECIMAL_PLACES};
pub use helper::{NumericHelper, NumericSettings};
