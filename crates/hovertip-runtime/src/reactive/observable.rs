#![forbid(unsafe_code)]

//! Shared values that announce their changes.
//!
//! Triggers publish their anchor rectangle through an [`Observable`], and
//! tooltips subscribe to it so that a hover change can invalidate them and
//! end a show cycle before the runtime gets to the next frame. Tooltips in
//! turn publish their visibility state through one so tests and the harness
//! can watch a component after the runtime owns it.
//!
//! A write that leaves the value equal to the old one is ignored: no version
//! bump, no callbacks. Callbacks run in the order they subscribed, outside
//! any internal borrow, so a callback may read or write the same observable.
//! When a callback writes, the remaining callbacks of the stale round are
//! skipped and only the newer value is delivered.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::trace;

type Callback<T> = Rc<dyn Fn(&T)>;

struct Subscriber<T> {
    live: Rc<Cell<bool>>,
    callback: Callback<T>,
}

struct Shared<T> {
    value: T,
    version: u64,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> Shared<T> {
    fn prune(&mut self) {
        self.subscribers.retain(|s| s.live.get());
    }
}

/// Handle to a shared value. Clones point at the same value.
pub struct Observable<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("Observable")
            .field("value", &shared.value)
            .field("version", &shared.version)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.shared.borrow().value.clone()
    }

    /// Borrow the value for the duration of `f`.
    ///
    /// `f` must not write to this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.borrow().value)
    }

    /// Store `value` and notify subscribers if it differs from the current one.
    pub fn set(&self, value: T) {
        let version = {
            let mut shared = self.shared.borrow_mut();
            if shared.value == value {
                return;
            }
            shared.value = value;
            shared.version += 1;
            shared.version
        };
        self.deliver(version);
    }

    /// Register `callback`. It stays registered until the guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let live = Rc::new(Cell::new(true));
        let mut shared = self.shared.borrow_mut();
        shared.prune();
        shared.subscribers.push(Subscriber {
            live: Rc::clone(&live),
            callback: Rc::new(callback),
        });
        Subscription { live }
    }

    /// Number of accepted writes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.borrow().version
    }

    /// Subscribers whose guard is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.live.get())
            .count()
    }

    fn deliver(&self, version: u64) {
        let (value, round) = {
            let mut shared = self.shared.borrow_mut();
            shared.prune();
            let round: Vec<(Rc<Cell<bool>>, Callback<T>)> = shared
                .subscribers
                .iter()
                .map(|s| (Rc::clone(&s.live), Rc::clone(&s.callback)))
                .collect();
            (shared.value.clone(), round)
        };
        if round.is_empty() {
            return;
        }
        trace!(
            target: "hovertip.reactive",
            version,
            subscribers = round.len(),
            "delivering change"
        );
        for (live, callback) in round {
            if self.shared.borrow().version != version {
                // A callback wrote a newer value and delivered it already.
                return;
            }
            if live.get() {
                callback(&value);
            }
        }
    }
}

/// Keeps a callback registered. Drop it to unsubscribe.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    live: Rc<Cell<bool>>,
}

impl Subscription {
    /// Unsubscribe now; same as dropping.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.live.set(false);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("live", &self.live.get())
            .finish()
    }
}
