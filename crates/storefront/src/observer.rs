//! Explicit observer/subscription contract for state owners.
//!
//! Each store owns its state and notifies registered listeners synchronously
//! after every transition. Dispatches are serialized by the store's internal
//! mutex; listeners run on the dispatching thread after the state lock has
//! been released, and with no registry lock held, so a listener may freely
//! re-enter the store (subscribe, unsubscribe, or dispatch a follow-up
//! action).

use std::sync::{Arc, Mutex};

/// Handle identifying a registered listener, returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A set of listeners over state snapshots of type `T`.
pub struct Listeners<T> {
    entries: Mutex<ListenerEntries<T>>,
}

struct ListenerEntries<T> {
    next_id: u64,
    callbacks: Vec<(ListenerId, Callback<T>)>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(ListenerEntries {
                next_id: 0,
                callbacks: Vec::new(),
            }),
        }
    }
}

impl<T> Listeners<T> {
    /// Register a listener; it will be invoked synchronously after every
    /// state transition until unsubscribed.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> ListenerId {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let id = ListenerId(entries.next_id);
        entries.next_id += 1;
        entries.callbacks.push((id, Arc::new(callback)));
        id
    }

    /// Remove a listener. Unknown IDs are ignored.
    pub fn unsubscribe(&self, id: ListenerId) {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.callbacks.retain(|(entry_id, _)| *entry_id != id);
    }

    /// Invoke every listener with the new state snapshot.
    ///
    /// The callback list is snapshotted and the registry lock released
    /// before any callback runs, so callbacks may re-enter this registry.
    /// A listener subscribed during notification first fires on the next
    /// transition; one unsubscribed mid-notification may still see the
    /// current snapshot.
    pub fn notify(&self, state: &T) {
        let callbacks: Vec<Callback<T>> = {
            let entries = self
                .entries
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            entries
                .callbacks
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect()
        };
        for callback in callbacks {
            callback(state);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .callbacks
            .len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
