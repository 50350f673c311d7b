//! Single-threaded reactive cells.
//!
//! Validation state is built on a small push/pull reactive graph:
//! - [`Observable`]: a mutable cell; writes push invalidation to dependents
//! - [`Computed`]: a derived value; reads pull a recomputation when stale
//!
//! Reads inside a computation are tracked automatically through a
//! thread-local observer stack. Subscribers are held weakly, so dropping a
//! computed detaches it from everything it read.

mod computed;
mod observable;
mod tracking;

pub use computed::{Computed, Evaluation};
pub use observable::Observable;
pub use tracking::untracked;

use std::fmt;
use std::rc::Rc;

/// Anything whose current value can be read reactively.
///
/// Validation can only be attached to signals, which is what rules out
/// plain, non-observable values at compile time.
pub trait Signal<T> {
    /// Read and register a dependency.
    fn read(&self) -> T;

    /// Read without registering a dependency.
    fn peek(&self) -> T;

    /// A handle that reads the signal without keeping it alive.
    fn downgrade(&self) -> WeakSignal<T>;
}

/// Non-owning, tracked reader for a signal.
pub struct WeakSignal<T> {
    reader: Rc<dyn Fn() -> Option<T>>,
}

impl<T> WeakSignal<T> {
    pub(crate) fn new(reader: impl Fn() -> Option<T> + 'static) -> Self {
        Self {
            reader: Rc::new(reader),
        }
    }

    /// Read the signal, or `None` once it has been dropped.
    pub fn read(&self) -> Option<T> {
        (self.reader)()
    }

    /// Read without registering a dependency.
    pub fn peek(&self) -> Option<T> {
        untracked(|| self.read())
    }
}

impl<T> Clone for WeakSignal<T> {
    fn clone(&self) -> Self {
        Self {
            reader: Rc::clone(&self.reader),
        }
    }
}

impl<T> fmt::Debug for WeakSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakSignal")
    }
}
