//! Observer registry
//!
//! Stores publish their change events through an [`Observers`] handle.
//! Callbacks are snapshotted before delivery so an observer may subscribe,
//! unsubscribe or call back into the publishing store while it is notified.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Registry<E> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<E>)>,
}

pub struct Observers<E> {
    registry: Arc<RwLock<Registry<E>>>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry {
                next_id: 1,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a callback, returning the id needed to unsubscribe it
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut registry = self.registry.write();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.entries.push((id, Arc::new(callback)));

        tracing::trace!(subscription = %id, "Observer subscribed");

        id
    }

    /// Remove a callback. Returns false if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.write();
        let before = registry.entries.len();
        registry.entries.retain(|(entry_id, _)| *entry_id != id);
        registry.entries.len() != before
    }

    pub fn notify(&self, event: &E) {
        for callback in self.snapshot() {
            callback(event);
        }
    }

    /// Deliver a batch of events in order
    pub fn notify_all(&self, events: &[E]) {
        if events.is_empty() {
            return;
        }

        let callbacks = self.snapshot();
        for event in events {
            for callback in &callbacks {
                callback(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registry.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if both handles share one registry
    pub fn same_registry(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.registry, &other.registry)
    }

    fn snapshot(&self) -> Vec<Callback<E>> {
        self.registry
            .read()
            .entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Observers<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.len())
            .finish()
    }
}
