//! RecordingHost: a HostApi that records every emission.

use crate::event::ActionStatus;
use crate::host::HostApi;
use crate::payload::Props;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// One emission received through host callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEmission {
    /// `on_state` was called.
    State(Value),
    /// `on_action` was called.
    Action {
        /// Action name.
        action: String,
        /// Outcome.
        status: ActionStatus,
        /// Extra fields.
        extra: Props,
    },
    /// `on_error` was called.
    Error {
        /// Reason.
        reason: String,
        /// Extra fields.
        extra: Props,
    },
}

/// Records what a [`HostApi`] built from it receives.
/// Use `.emissions()` to inspect.
#[derive(Clone, Default)]
pub struct RecordingHost {
    emissions: Arc<Mutex<Vec<RecordedEmission>>>,
}

impl RecordingHost {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A host API with all three callbacks wired to this recorder.
    pub fn api(&self) -> HostApi {
        let actions = Arc::clone(&self.emissions);
        let errors = Arc::clone(&self.emissions);
        self.state_only()
            .on_action(move |action, status, extra| {
                actions.lock().unwrap().push(RecordedEmission::Action {
                    action: action.to_owned(),
                    status,
                    extra: extra.clone(),
                });
            })
            .on_error(move |reason, extra| {
                errors.lock().unwrap().push(RecordedEmission::Error {
                    reason: reason.to_owned(),
                    extra: extra.clone(),
                });
            })
    }

    /// A host API that only takes over state emission.
    pub fn state_only(&self) -> HostApi {
        let log = Arc::clone(&self.emissions);
        HostApi::new().on_state(move |state| {
            log.lock().unwrap().push(RecordedEmission::State(state.clone()));
        })
    }

    /// Snapshot of all recorded emissions.
    pub fn emissions(&self) -> Vec<RecordedEmission> {
        self.emissions.lock().unwrap().clone()
    }

    /// Only the recorded state snapshots.
    pub fn states(&self) -> Vec<Value> {
        self.emissions()
            .into_iter()
            .filter_map(|e| match e {
                RecordedEmission::State(state) => Some(state),
                _ => None,
            })
            .collect()
    }
}
