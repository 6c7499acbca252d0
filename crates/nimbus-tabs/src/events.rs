//! Lifecycle notifications
//!
//! Explicit subscriber fan-out owned by the manager. These four
//! notifications are the only contract the UI layer should depend on.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TabEvent {
    #[serde(rename = "session-created")]
    Created { ordinal: u64 },

    #[serde(rename = "session-focused")]
    Focused { ordinal: u64 },

    #[serde(rename = "session-closed")]
    Closed { ordinal: u64 },

    #[serde(rename = "session-navigated")]
    Navigated {
        ordinal: u64,
        title: String,
        address: String,
    },
}

type Subscriber = Arc<dyn Fn(&TabEvent) + Send + Sync>;

#[derive(Default)]
pub(crate) struct EventBus {
    subscribers: RwLock<Vec<Subscriber>>,
}

impl EventBus {
    pub(crate) fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&TabEvent) + Send + Sync + 'static,
    {
        self.subscribers.write().push(Arc::new(callback));
    }

    /// Deliver to every subscriber in registration order. Callers must
    /// not hold manager locks across this. The list is snapshotted
    /// first, so a subscriber may subscribe re-entrantly; it starts
    /// receiving from the next emit.
    pub(crate) fn emit(&self, event: TabEvent) {
        tracing::debug!(?event, "Emitting tab event");
        let subscribers: Vec<Subscriber> = self.subscribers.read().clone();
        for subscriber in &subscribers {
            subscriber(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = TabEvent::Navigated {
            ordinal: 3,
            title: "Example".to_string(),
            address: "https://example.com/".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"session-navigated\""));

        let back: TabEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_subscribers_receive_in_order() {
        use parking_lot::Mutex;

        let bus = EventBus::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["a", "b"] {
            let seen = Arc::clone(&seen);
            bus.subscribe(move |event| {
                if let TabEvent::Created { ordinal } = event {
                    seen.lock().push((tag, *ordinal));
                }
            });
        }

        bus.emit(TabEvent::Created { ordinal: 1 });
        assert_eq!(*seen.lock(), vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn test_subscribe_during_dispatch_takes_effect_next_emit() {
        use parking_lot::Mutex;

        let bus = Arc::new(EventBus::default());
        let late_calls = Arc::new(Mutex::new(0u32));

        let reentrant = Arc::clone(&bus);
        let counter = Arc::clone(&late_calls);
        bus.subscribe(move |_| {
            let counter = Arc::clone(&counter);
            reentrant.subscribe(move |_| *counter.lock() += 1);
        });

        // The subscriber added mid-dispatch misses the triggering emit
        bus.emit(TabEvent::Created { ordinal: 1 });
        assert_eq!(*late_calls.lock(), 0);

        bus.emit(TabEvent::Created { ordinal: 2 });
        assert_eq!(*late_calls.lock(), 1);
    }
}
