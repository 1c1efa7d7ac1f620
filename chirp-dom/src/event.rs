//! Events and listener lists.

use crate::id::ListenerId;
use parking_lot::Mutex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// An event delivered to listeners. Custom events carry a JSON `detail`.
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    event_type: String,
    detail: Option<Value>,
}

impl DomEvent {
    /// A plain event (`click`, `input`, `change`, ...).
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            detail: None,
        }
    }

    /// A custom event carrying a detail payload.
    pub fn custom(event_type: impl Into<String>, detail: Value) -> Self {
        Self {
            event_type: event_type.into(),
            detail: Some(detail),
        }
    }

    /// The event type name.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The detail payload, if this is a custom event.
    pub fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }
}

/// A shared listener callback.
pub type Listener = Arc<dyn Fn(&DomEvent) + Send + Sync>;

struct Registration {
    id: ListenerId,
    event_type: String,
    listener: Listener,
}

/// An ordered listener list. Cloning yields another handle to the same list.
///
/// Dispatch snapshots the matching listeners and releases the lock before
/// calling any of them, so listeners may freely add or remove listeners
/// (including themselves) or dispatch further events. A listener removed
/// mid-dispatch is not called if its turn has not come yet.
#[derive(Clone, Default)]
pub struct EventTarget {
    registrations: Arc<Mutex<Vec<Registration>>>,
}

impl EventTarget {
    /// Create an empty target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener for `event_type`.
    pub fn add_event_listener(
        &self,
        event_type: &str,
        listener: impl Fn(&DomEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId::next();
        self.registrations.lock().push(Registration {
            id,
            event_type: event_type.to_owned(),
            listener: Arc::new(listener),
        });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered here.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut registrations = self.registrations.lock();
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        registrations.len() != before
    }

    /// Deliver `event` to every listener registered for its type, in
    /// registration order. Returns how many listeners were called.
    pub fn dispatch_event(&self, event: &DomEvent) -> usize {
        let snapshot: Vec<(ListenerId, Listener)> = self
            .registrations
            .lock()
            .iter()
            .filter(|r| r.event_type == event.event_type)
            .map(|r| (r.id, Arc::clone(&r.listener)))
            .collect();

        let mut called = 0;
        for (id, listener) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            listener(event);
            called += 1;
        }
        called
    }

    /// Number of listeners registered for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.registrations
            .lock()
            .iter()
            .filter(|r| r.event_type == event_type)
            .count()
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.registrations.lock().iter().any(|r| r.id == id)
    }
}

impl fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTarget")
            .field("listeners", &self.registrations.lock().len())
            .finish()
    }
}
