//! Change-notification bus.
//!
//! Decouples a state owner (the cart store, the auth gate) from an
//! unbounded, dynamically changing set of display surfaces. The bus
//! carries a notification, not a value: subscribers re-read the
//! owning store themselves, so the truth always comes from the
//! single source rather than a possibly stale payload.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Weak};
use tracing::warn;

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// A zero-payload broadcast channel.
///
/// Cloning yields another handle to the same channel. Listeners are
/// invoked synchronously, in subscription order. A listener that
/// panics is isolated; the remaining listeners still run.
#[derive(Clone, Default)]
pub struct ChangeBus {
    inner: Arc<Mutex<BusInner>>,
}

impl ChangeBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a listener.
    ///
    /// The listener stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Notify every current subscriber, in subscription order.
    ///
    /// The subscriber list is snapshotted before dispatch, so a
    /// listener may subscribe or drop subscriptions without
    /// deadlocking the bus.
    pub fn publish(&self) {
        let listeners: Vec<Listener> = {
            let inner = match self.inner.lock() {
                Ok(inner) => inner,
                Err(poisoned) => poisoned.into_inner(),
            };
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for listener in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener())).is_err() {
                warn!("change listener panicked; continuing fan-out");
            }
        }
    }

    /// Number of currently registered listeners.
    pub fn subscriber_count(&self) -> usize {
        match self.inner.lock() {
            Ok(inner) => inner.listeners.len(),
            Err(poisoned) => poisoned.into_inner().listeners.len(),
        }
    }
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// A live subscription; dropping it unsubscribes the listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<Mutex<BusInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            let mut inner = match bus.lock() {
                Ok(inner) => inner,
                Err(poisoned) => poisoned.into_inner(),
            };
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
