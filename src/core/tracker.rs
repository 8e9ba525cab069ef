//! Global scroll observable.
//!
//! [`ScrollTracker`] holds the latest [`ScrollState`] and fans every change
//! out to its subscribers.  It is a cheap `Rc` handle: clone it into each
//! consumer.  A single listener on the host's scroll signal is attached when
//! the first subscriber arrives and detached when the last one leaves, via
//! the [`SignalHooks`] the tracker was built with.
//!
//! Everything here runs on the event-loop thread, so shared state is
//! `Rc<RefCell<_>>`.  Callbacks are invoked with no borrow held, which lets
//! a callback subscribe or unsubscribe re-entrantly.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::transform::ScrollState;

/// Host-side hooks for the underlying scroll signal.
pub trait SignalHooks {
    /// Called when the first subscriber arrives.
    fn attach(&mut self) {}
    /// Called when the last subscriber leaves.
    fn detach(&mut self) {}
}

/// Hooks that do nothing — for hosts that always deliver scroll events.
#[derive(Debug, Default)]
pub struct NoHooks;

impl SignalHooks for NoHooks {}

type Callback = Rc<RefCell<dyn FnMut(ScrollState)>>;

struct Inner {
    current: ScrollState,
    next_id: u64,
    /// Ordered by id so callbacks fire in subscription order.
    subscribers: BTreeMap<u64, Callback>,
    attached: bool,
    hooks: Box<dyn SignalHooks>,
}

/// Shared, subscribable scroll position.
#[derive(Clone)]
pub struct ScrollTracker {
    inner: Rc<RefCell<Inner>>,
}

impl ScrollTracker {
    pub fn new(hooks: impl SignalHooks + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                current: ScrollState::default(),
                next_id: 0,
                subscribers: BTreeMap::new(),
                attached: false,
                hooks: Box::new(hooks),
            })),
        }
    }

    /// Latest published sample.
    pub fn current(&self) -> ScrollState {
        self.inner.borrow().current
    }

    /// Whether the host listener is currently attached.
    pub fn is_attached(&self) -> bool {
        self.inner.borrow().attached
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Register `callback` for every future change.  Dropping (or calling
    /// [`Subscription::unsubscribe`] on) the returned handle stops delivery.
    pub fn subscribe(&self, callback: impl FnMut(ScrollState) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .subscribers
            .insert(id, Rc::new(RefCell::new(callback)));

        if !inner.attached {
            inner.attached = true;
            inner.hooks.attach();
            tracing::debug!("scroll listener attached");
        }

        Subscription {
            tracker: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Push a new sample.  Identical consecutive samples are dropped.
    pub fn publish(&self, state: ScrollState) {
        let callbacks: Vec<(u64, Callback)> = {
            let mut inner = self.inner.borrow_mut();
            if inner.current == state {
                return;
            }
            inner.current = state;
            inner
                .subscribers
                .iter()
                .map(|(id, cb)| (*id, Rc::clone(cb)))
                .collect()
        };

        for (id, callback) in callbacks {
            // An earlier callback in this round may have unsubscribed this one.
            if !self.inner.borrow().subscribers.contains_key(&id) {
                continue;
            }
            // A callback that re-entrantly publishes would find itself
            // already borrowed; skip it rather than panic.
            if let Ok(mut cb) = callback.try_borrow_mut() {
                (&mut *cb)(state);
            }
        }
    }

    /// Convenience for `publish` with a new offset and the current height.
    pub fn scroll_to(&self, scroll_y: f64) {
        let viewport_height = self.current().viewport_height;
        self.publish(ScrollState::new(scroll_y, viewport_height));
    }

    /// Convenience for `publish` with a new height and the current offset.
    pub fn resize(&self, viewport_height: f64) {
        let scroll_y = self.current().scroll_y;
        self.publish(ScrollState::new(scroll_y, viewport_height));
    }
}

fn remove_subscriber(inner: &RefCell<Inner>, id: u64) {
    let removed = {
        let mut inner = inner.borrow_mut();
        let removed = inner.subscribers.remove(&id);
        if inner.subscribers.is_empty() && inner.attached {
            inner.attached = false;
            inner.hooks.detach();
            tracing::debug!("scroll listener detached");
        }
        removed
    };
    // Dropped outside the borrow: the closure may own another Subscription.
    drop(removed);
}

// ───────────────────────────────────────── handle ────────────

/// Live registration on a [`ScrollTracker`].
///
/// Holds only a weak reference, so an outstanding subscription never keeps
/// the tracker alive.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    tracker: Weak<RefCell<Inner>>,
    id: Option<u64>,
}

impl Subscription {
    /// Stop delivery.  Idempotent.
    pub fn unsubscribe(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(inner) = self.tracker.upgrade() {
            remove_subscriber(&inner, id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.tracker.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
