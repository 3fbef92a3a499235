use crate::i18n::Locale;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::debug;

/// Which operation produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Locale,
    Profile,
    DarkMode,
    Reset,
}

/// Snapshot of the session delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub locale: Locale,
    pub profile: &'static str,
    pub dark_mode: bool,
}

type Callback = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

#[derive(Default)]
struct BusInner {
    subscribers: Mutex<HashMap<u64, Callback>>,
    next_id: AtomicU64,
}

impl BusInner {
    fn subscribers(&self) -> MutexGuard<'_, HashMap<u64, Callback>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Publish/subscribe channel for `ChangeEvent`s. Clones share subscribers.
#[derive(Clone, Default)]
pub struct ChangeBus {
    inner: Arc<BusInner>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every future event.
    ///
    /// Delivery order between subscribers is unspecified.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers().insert(id, Arc::new(callback));
        debug!("Subscriber {} registered", id);
        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every subscriber. Returns how many were notified.
    pub fn publish(&self, event: &ChangeEvent) -> usize {
        let callbacks: Vec<Callback> = self.inner.subscribers().values().cloned().collect();
        for callback in &callbacks {
            callback(event);
        }
        debug!(
            "Broadcast {:?} change ({}) to {} subscribers",
            event.kind,
            event.locale,
            callbacks.len()
        );
        callbacks.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers().len()
    }
}

/// Handle returned by `ChangeBus::subscribe`.
///
/// Dropping the handle keeps the callback registered; call `unsubscribe` to
/// remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
}

impl Subscription {
    /// Remove the callback. Returns `false` if it was already gone.
    pub fn unsubscribe(self) -> bool {
        match self.bus.upgrade() {
            Some(bus) => bus.subscribers().remove(&self.id).is_some(),
            None => false,
        }
    }
}
