//! Built-in rules.
//!
//! Each rule stores an unformatted message and substitutes its own
//! placeholders (`{minimum}`, `{maximum}`) when it fails. `{name}` and
//! `{value}` are left for the property state to fill in.
//!
//! Closures are rules too, so anything not covered here can be written
//! inline:
//!
//! ```rust
//! use vigil::builder::PropertyValidationBuilder;
//! use vigil::core::ValidationResult;
//! use vigil::reactive::Observable;
//!
//! let code = Observable::new("ab".to_string());
//! let validation = PropertyValidationBuilder::new()
//!     .rule(|value: &String| {
//!         if value.chars().all(|c| c.is_ascii_uppercase()) {
//!             ValidationResult::success()
//!         } else {
//!             ValidationResult::failure("Use capital letters")
//!         }
//!     })
//!     .attach(&code)
//!     .unwrap();
//!
//! assert_eq!(validation.message(), "Use capital letters");
//! ```

mod bounds;
mod text;

pub use bounds::{Maximum, Minimum, Range};
pub use text::{Length, Matches, Predicate};
