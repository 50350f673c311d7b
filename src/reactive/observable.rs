//! Mutable observable cells.

use super::tracking::Subscribers;
use super::{Signal, WeakSignal};
use crate::state::{Attachable, ValidationSlot};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

struct ObservableNode<T> {
    value: RefCell<T>,
    subscribers: Subscribers,
    slot: ValidationSlot,
}

impl<T> Drop for ObservableNode<T> {
    fn drop(&mut self) {
        self.subscribers.notify();
    }
}

/// A shared, mutable value whose reads are tracked as dependencies.
///
/// Cloning an `Observable` yields another handle to the same cell.
/// Every write invalidates the computeds that read it.
///
/// # Example
///
/// ```rust
/// use vigil::reactive::{Computed, Observable};
///
/// let age = Observable::new(15);
/// let adult = Computed::deferred({
///     let age = age.clone();
///     move || age.read() >= 18
/// });
///
/// assert!(!adult.read());
/// age.write(21);
/// assert!(adult.read());
/// ```
pub struct Observable<T> {
    node: Rc<ObservableNode<T>>,
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            node: Rc::new(ObservableNode {
                value: RefCell::new(value),
                subscribers: Subscribers::default(),
                slot: ValidationSlot::default(),
            }),
        }
    }

    /// Read the value and register it as a dependency of the running computation.
    pub fn read(&self) -> T {
        self.node.subscribers.track();
        self.node.value.borrow().clone()
    }

    /// Read the value without registering a dependency.
    pub fn peek(&self) -> T {
        self.node.value.borrow().clone()
    }

    /// Replace the value and invalidate dependents.
    pub fn write(&self, value: T) {
        let previous = self.node.value.replace(value);
        drop(previous);
        self.node.subscribers.notify();
    }

    /// Mutate the value in place and invalidate dependents.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.node.value.borrow_mut());
        self.node.subscribers.notify();
    }

    /// Whether two handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl<T: Clone + 'static> Signal<T> for Observable<T> {
    fn read(&self) -> T {
        Observable::read(self)
    }

    fn peek(&self) -> T {
        Observable::peek(self)
    }

    fn downgrade(&self) -> WeakSignal<T> {
        let weak = Rc::downgrade(&self.node);
        WeakSignal::new(move || {
            weak.upgrade()
                .map(|node| Observable { node }.read())
        })
    }
}

impl<T> Attachable for Observable<T> {
    fn validation_slot(&self) -> &ValidationSlot {
        &self.node.slot
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<T: Default + Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Observable")
            .field(&*self.node.value.borrow())
            .finish()
    }
}
