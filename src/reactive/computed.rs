//! Derived values recomputed from tracked dependencies.

use super::observable::Observable;
use super::tracking::{self, Observer, Subscribers};
use super::{Signal, WeakSignal};
use crate::state::{Attachable, ValidationSlot};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// When a computed value re-runs its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// Evaluate on construction and again as soon as a dependency changes.
    Eager,

    /// Evaluate on first read, and on the next read after a dependency changes.
    Deferred,
}

struct ComputedNode<T> {
    compute: Box<dyn Fn() -> T>,
    value: RefCell<Option<T>>,
    stale: Cell<bool>,
    evaluation: Evaluation,
    paused: Option<Observable<bool>>,
    subscribers: Subscribers,
    slot: ValidationSlot,
    this: Weak<ComputedNode<T>>,
}

impl<T: Clone + 'static> ComputedNode<T> {
    fn observer(&self) -> Weak<dyn Observer> {
        self.this.clone()
    }

    fn evaluate(&self) -> T {
        let value = tracking::with_observer(self.observer(), || (self.compute)());
        // The previous value is dropped outside the borrow.
        let _previous = self.value.replace(Some(value.clone()));
        self.stale.set(false);
        value
    }

    /// A paused computed keeps returning its last value. The paused flag is
    /// read as a dependency so resuming invalidates this node.
    fn frozen(&self) -> bool {
        match &self.paused {
            Some(paused) => tracking::with_observer(self.observer(), || paused.read()),
            None => false,
        }
    }

    fn current(&self) -> T {
        let reusable = self.frozen() || !self.stale.get();
        if reusable {
            if let Some(value) = self.value.borrow().as_ref() {
                return value.clone();
            }
        }
        self.evaluate()
    }
}

impl<T: Clone + 'static> Observer for ComputedNode<T> {
    fn invalidate(&self) {
        self.stale.set(true);
        if self.evaluation == Evaluation::Eager {
            self.evaluate();
        }
        self.subscribers.notify();
    }
}

impl<T> Drop for ComputedNode<T> {
    fn drop(&mut self) {
        self.subscribers.notify();
    }
}

/// A value derived from observables and other computeds.
///
/// Dependencies are discovered automatically: whatever the function reads
/// through [`Observable::read`] or [`Computed::read`] while it runs becomes a
/// dependency. Three flavours exist:
///
/// - [`Computed::eager`]: evaluated immediately and on every change
/// - [`Computed::deferred`]: evaluated lazily, on the first read after a change
/// - [`Computed::pausable`]: deferred, but frozen at its last value while the
///   `paused` observable is `true`; [`Computed::refresh`] recomputes on demand
///
/// # Example
///
/// ```rust
/// use vigil::reactive::{Computed, Observable};
///
/// let value = Observable::new(1);
/// let paused = Observable::new(false);
/// let doubled = Computed::pausable(
///     {
///         let value = value.clone();
///         move || value.read() * 2
///     },
///     paused.clone(),
/// );
///
/// assert_eq!(doubled.read(), 2);
/// paused.write(true);
/// value.write(5);
/// assert_eq!(doubled.read(), 2);
/// doubled.refresh();
/// assert_eq!(doubled.read(), 10);
/// ```
pub struct Computed<T> {
    node: Rc<ComputedNode<T>>,
}

impl<T: Clone + 'static> Computed<T> {
    fn build(
        compute: impl Fn() -> T + 'static,
        evaluation: Evaluation,
        paused: Option<Observable<bool>>,
    ) -> Self {
        let node = Rc::new_cyclic(|this| ComputedNode {
            compute: Box::new(compute),
            value: RefCell::new(None),
            stale: Cell::new(true),
            evaluation,
            paused,
            subscribers: Subscribers::default(),
            slot: ValidationSlot::default(),
            this: this.clone(),
        });

        if evaluation == Evaluation::Eager {
            node.evaluate();
        }

        Self { node }
    }

    /// Computed that evaluates now and re-evaluates as soon as an input changes.
    pub fn eager(compute: impl Fn() -> T + 'static) -> Self {
        Self::build(compute, Evaluation::Eager, None)
    }

    /// Computed that evaluates on first read and after each invalidation.
    pub fn deferred(compute: impl Fn() -> T + 'static) -> Self {
        Self::build(compute, Evaluation::Deferred, None)
    }

    /// Deferred computed that can be frozen through the `paused` observable.
    pub fn pausable(compute: impl Fn() -> T + 'static, paused: Observable<bool>) -> Self {
        Self::build(compute, Evaluation::Deferred, Some(paused))
    }

    /// Read the value, recomputing if stale, and register it as a dependency.
    pub fn read(&self) -> T {
        self.node.subscribers.track();
        self.node.current()
    }

    /// Read the value without registering a dependency.
    pub fn peek(&self) -> T {
        self.node.current()
    }

    /// Recompute now, even while paused, and invalidate dependents.
    pub fn refresh(&self) -> T {
        let value = self.node.evaluate();
        tracing::trace!("computed value refreshed");
        self.node.subscribers.notify();
        value
    }

    /// The observable controlling this computed, when it is pausable.
    pub fn paused(&self) -> Option<&Observable<bool>> {
        self.node.paused.as_ref()
    }

    pub fn is_paused(&self) -> bool {
        self.node.paused.as_ref().is_some_and(Observable::peek)
    }

    pub fn evaluation(&self) -> Evaluation {
        self.node.evaluation
    }
}

impl<T: Clone + 'static> Signal<T> for Computed<T> {
    fn read(&self) -> T {
        Computed::read(self)
    }

    fn peek(&self) -> T {
        Computed::peek(self)
    }

    fn downgrade(&self) -> WeakSignal<T> {
        let weak = Rc::downgrade(&self.node);
        WeakSignal::new(move || weak.upgrade().map(|node| Computed { node }.read()))
    }
}

impl<T> Attachable for Computed<T> {
    fn validation_slot(&self) -> &ValidationSlot {
        &self.node.slot
    }
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            node: Rc::clone(&self.node),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed")
            .field("value", &*self.node.value.borrow())
            .field("stale", &self.node.stale.get())
            .field("evaluation", &self.node.evaluation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as Counter;

    fn counted(source: &Observable<i32>, runs: &Rc<Counter<usize>>) -> impl Fn() -> i32 {
        let source = source.clone();
        let runs = Rc::clone(runs);
        move || {
            runs.set(runs.get() + 1);
            source.read() + 1
        }
    }

    #[test]
    fn deferred_does_not_evaluate_until_read() {
        let source = Observable::new(1);
        let runs = Rc::new(Counter::new(0));
        let computed = Computed::deferred(counted(&source, &runs));

        assert_eq!(runs.get(), 0);
        assert_eq!(computed.read(), 2);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn deferred_reuses_value_until_invalidated() {
        let source = Observable::new(1);
        let runs = Rc::new(Counter::new(0));
        let computed = Computed::deferred(counted(&source, &runs));

        computed.read();
        computed.read();
        assert_eq!(runs.get(), 1);

        source.write(4);
        assert_eq!(runs.get(), 1);
        assert_eq!(computed.read(), 5);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn eager_evaluates_on_construction_and_on_change() {
        let source = Observable::new(1);
        let runs = Rc::new(Counter::new(0));
        let computed = Computed::eager(counted(&source, &runs));

        assert_eq!(runs.get(), 1);
        source.write(2);
        assert_eq!(runs.get(), 2);
        assert_eq!(computed.peek(), 3);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn chains_propagate_invalidation() {
        let source = Observable::new(2);
        let doubled = Computed::deferred({
            let source = source.clone();
            move || source.read() * 2
        });
        let quadrupled = Computed::deferred({
            let doubled = doubled.clone();
            move || doubled.read() * 2
        });

        assert_eq!(quadrupled.read(), 8);
        source.write(3);
        assert_eq!(quadrupled.read(), 12);
    }

    #[test]
    fn paused_computed_holds_last_value_until_refresh() {
        let source = Observable::new(1);
        let paused = Observable::new(false);
        let computed = Computed::pausable(
            {
                let source = source.clone();
                move || source.read() * 10
            },
            paused.clone(),
        );

        assert_eq!(computed.read(), 10);
        paused.write(true);
        assert!(computed.is_paused());
        source.write(2);
        assert_eq!(computed.read(), 10);

        assert_eq!(computed.refresh(), 20);
        assert_eq!(computed.read(), 20);
    }

    #[test]
    fn resuming_invalidates_dependents() {
        let source = Observable::new(1);
        let paused = Observable::new(false);
        let inner = Computed::pausable(
            {
                let source = source.clone();
                move || source.read()
            },
            paused.clone(),
        );
        let outer = Computed::deferred({
            let inner = inner.clone();
            move || inner.read() + 100
        });

        assert_eq!(outer.read(), 101);
        paused.write(true);
        source.write(5);
        assert_eq!(outer.read(), 101);

        paused.write(false);
        assert_eq!(outer.read(), 105);
    }

    #[test]
    fn paused_before_first_read_still_evaluates_once() {
        let source = Observable::new(3);
        let computed = Computed::pausable(
            {
                let source = source.clone();
                move || source.read()
            },
            Observable::new(true),
        );

        assert_eq!(computed.read(), 3);
        source.write(4);
        assert_eq!(computed.read(), 3);
    }

    #[test]
    fn dependencies_follow_branches() {
        let flag = Observable::new(true);
        let left = Observable::new(1);
        let right = Observable::new(2);
        let runs = Rc::new(Counter::new(0));
        let computed = Computed::deferred({
            let (flag, left, right, runs) = (flag.clone(), left.clone(), right.clone(), runs.clone());
            move || {
                runs.set(runs.get() + 1);
                if flag.read() {
                    left.read()
                } else {
                    right.read()
                }
            }
        });

        assert_eq!(computed.read(), 1);
        right.write(20);
        assert_eq!(computed.read(), 1);
        assert_eq!(runs.get(), 1);

        flag.write(false);
        assert_eq!(computed.read(), 20);
    }
}
