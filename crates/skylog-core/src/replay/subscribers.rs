//! Subscription hub
//!
//! Registers observers and fans snapshots out to them in registration
//! order. No buffering: observers only ever see the latest state as of
//! when they were notified.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::Snapshot;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Observer = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// Observer registry with synchronous broadcast.
#[derive(Default)]
pub(crate) struct SubscriberHub {
    observers: Mutex<Vec<(SubscriberId, Observer)>>,
    next_id: AtomicU64,
}

impl SubscriberHub {
    pub fn subscribe(&self, observer: impl Fn(&Snapshot) + Send + Sync + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .lock()
            .unwrap()
            .push((id, Arc::new(observer)));
        id
    }

    /// Remove an observer. Safe to call from inside a broadcast; the
    /// broadcast already in progress still uses the list it started with.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut observers = self.observers.lock().unwrap();
        let before = observers.len();
        observers.retain(|(other, _)| *other != id);
        observers.len() != before
    }

    /// Broadcast a snapshot to every observer, in registration order.
    pub fn notify(&self, snapshot: &Snapshot) {
        // Snapshot the list first so observers may unsubscribe mid-broadcast.
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .unwrap()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer(snapshot);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.observers.lock().unwrap().len()
    }
}
