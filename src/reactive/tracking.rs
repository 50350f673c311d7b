//! Dependency tracking context.
//!
//! While a computed value evaluates, it sits on top of a thread-local
//! observer stack. Every observable or computed read during that time
//! registers the observer as a subscriber, so a later write can invalidate it.

use std::cell::RefCell;
use std::rc::Weak;

/// Something that can be told its inputs changed.
pub(crate) trait Observer {
    fn invalidate(&self);
}

thread_local! {
    static OBSERVERS: RefCell<Vec<Option<Weak<dyn Observer>>>> = const { RefCell::new(Vec::new()) };
}

/// Pops the observer stack when dropped, so a panicking computation
/// cannot leave a stale observer behind.
struct Frame;

impl Drop for Frame {
    fn drop(&mut self) {
        OBSERVERS.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

fn run_in_frame<R>(entry: Option<Weak<dyn Observer>>, f: impl FnOnce() -> R) -> R {
    OBSERVERS.with(|stack| stack.borrow_mut().push(entry));
    let _frame = Frame;
    f()
}

/// Run `f` with `observer` registered as the current dependent.
pub(crate) fn with_observer<R>(observer: Weak<dyn Observer>, f: impl FnOnce() -> R) -> R {
    run_in_frame(Some(observer), f)
}

/// Run `f` without registering any dependencies.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    run_in_frame(None, f)
}

/// The observer that should be subscribed by a read happening right now.
pub(crate) fn current() -> Option<Weak<dyn Observer>> {
    OBSERVERS.with(|stack| stack.borrow().last().cloned().flatten())
}

/// Weak subscriber list shared by observables and computeds.
#[derive(Default)]
pub(crate) struct Subscribers(RefCell<Vec<Weak<dyn Observer>>>);

impl Subscribers {
    /// Subscribe the current observer, if any. Duplicate subscriptions are
    /// ignored and dropped observers are pruned.
    pub(crate) fn track(&self) {
        let Some(observer) = current() else {
            return;
        };

        let mut list = self.0.borrow_mut();
        list.retain(|existing| existing.strong_count() > 0);
        if !list.iter().any(|existing| Weak::ptr_eq(existing, &observer)) {
            list.push(observer);
        }
    }

    /// Invalidate every live subscriber.
    ///
    /// The list is drained first: observers resubscribe when they next
    /// evaluate, which keeps dependency sets current.
    pub(crate) fn notify(&self) {
        let list = std::mem::take(&mut *self.0.borrow_mut());
        for observer in list.iter().filter_map(Weak::upgrade) {
            observer.invalidate();
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.borrow().len()
    }
}
