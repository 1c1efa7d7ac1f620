//! RecordingListener: records custom-event details seen on a target.

use chirp_dom::{EventTarget, ListenerId};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A listener that records the detail of every event of one type.
pub struct RecordingListener {
    target: EventTarget,
    id: ListenerId,
    details: Arc<Mutex<Vec<Value>>>,
}

impl RecordingListener {
    /// Start recording `event_type` on `target`.
    pub fn attach(target: &EventTarget, event_type: &str) -> Self {
        let details = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&details);
        let id = target.add_event_listener(event_type, move |event| {
            let detail = event.detail().cloned().unwrap_or(Value::Null);
            log.lock().unwrap().push(detail);
        });
        Self {
            target: target.clone(),
            id,
            details,
        }
    }

    /// Snapshot of recorded details.
    pub fn details(&self) -> Vec<Value> {
        self.details.lock().unwrap().clone()
    }

    /// Number of events seen.
    pub fn count(&self) -> usize {
        self.details.lock().unwrap().len()
    }

    /// The most recent detail.
    pub fn last(&self) -> Option<Value> {
        self.details.lock().unwrap().last().cloned()
    }
}

impl Drop for RecordingListener {
    fn drop(&mut self) {
        self.target.remove_event_listener(self.id);
    }
}
