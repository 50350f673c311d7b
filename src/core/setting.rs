//! Settings that are either fixed or computed on demand.

use std::fmt;
use std::rc::Rc;

/// A configuration value that is either fixed or produced by a closure.
///
/// Closures run every time the setting is read. When a closure reads an
/// observable, that read is tracked like any other, so a validation state
/// whose `required` or `name` depends on other model values re-evaluates
/// when those values change.
///
/// # Example
///
/// ```rust
/// use vigil::core::Setting;
/// use vigil::reactive::Observable;
///
/// let fixed: Setting<bool> = true.into();
/// assert!(fixed.get());
///
/// let subscribed = Observable::new(false);
/// let required = Setting::dynamic({
///     let subscribed = subscribed.clone();
///     move || subscribed.read()
/// });
/// assert!(!required.get());
/// subscribed.write(true);
/// assert!(required.get());
/// ```
pub enum Setting<T> {
    Fixed(T),
    Dynamic(Rc<dyn Fn() -> T>),
}

impl<T: Clone> Setting<T> {
    pub fn dynamic(f: impl Fn() -> T + 'static) -> Self {
        Setting::Dynamic(Rc::new(f))
    }

    /// Current value of the setting.
    pub fn get(&self) -> T {
        match self {
            Setting::Fixed(value) => value.clone(),
            Setting::Dynamic(f) => f(),
        }
    }
}

impl<T> From<T> for Setting<T> {
    fn from(value: T) -> Self {
        Setting::Fixed(value)
    }
}

impl From<&str> for Setting<String> {
    fn from(value: &str) -> Self {
        Setting::Fixed(value.to_string())
    }
}

impl<T: Clone> Clone for Setting<T> {
    fn clone(&self) -> Self {
        match self {
            Setting::Fixed(value) => Setting::Fixed(value.clone()),
            Setting::Dynamic(f) => Setting::Dynamic(Rc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Setting::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}
