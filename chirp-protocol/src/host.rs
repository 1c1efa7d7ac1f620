//! Optional host callbacks that take over emission per event kind.

use crate::emitter::Emitter;
use crate::event::{ActionStatus, EventKind, IslandEvent};
use crate::payload::{IslandIdentity, Props};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type StateFn = Arc<dyn Fn(&Value) + Send + Sync>;
type ActionFn = Arc<dyn Fn(&str, ActionStatus, &Props) + Send + Sync>;
type ErrorFn = Arc<dyn Fn(&str, &Props) + Send + Sync>;

/// Host-supplied callbacks for a single mount.
///
/// A host that wants to route island events itself (into a store, say)
/// sets the callbacks it cares about. Each kind without a callback keeps
/// using broadcast; setting one callback never silences the others.
///
/// ```
/// use chirp_protocol::{Emitter, EventKind, HostApi};
///
/// let api = HostApi::new().on_state(|state| println!("{state}"));
/// assert!(api.supports(EventKind::State));
/// assert!(!api.supports(EventKind::Action));
/// ```
#[derive(Clone, Default)]
pub struct HostApi {
    emit_state: Option<StateFn>,
    emit_action: Option<ActionFn>,
    emit_error: Option<ErrorFn>,
}

impl HostApi {
    /// No callbacks: everything broadcasts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive state snapshots.
    pub fn on_state(mut self, f: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.emit_state = Some(Arc::new(f));
        self
    }

    /// Receive action outcomes: action name, status, extra fields.
    pub fn on_action(
        mut self,
        f: impl Fn(&str, ActionStatus, &Props) + Send + Sync + 'static,
    ) -> Self {
        self.emit_action = Some(Arc::new(f));
        self
    }

    /// Receive error signals: reason, extra fields.
    pub fn on_error(mut self, f: impl Fn(&str, &Props) + Send + Sync + 'static) -> Self {
        self.emit_error = Some(Arc::new(f));
        self
    }
}

impl Emitter for HostApi {
    fn supports(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::State => self.emit_state.is_some(),
            EventKind::Action => self.emit_action.is_some(),
            EventKind::Error => self.emit_error.is_some(),
        }
    }

    fn emit(&self, _source: &IslandIdentity, event: &IslandEvent) {
        match event {
            IslandEvent::State(state) => {
                if let Some(f) = &self.emit_state {
                    f(state);
                }
            }
            IslandEvent::Action {
                action,
                status,
                extra,
            } => {
                if let Some(f) = &self.emit_action {
                    f(action, *status, extra);
                }
            }
            IslandEvent::Error { reason, extra } => {
                if let Some(f) = &self.emit_error {
                    f(reason, extra);
                }
            }
        }
    }
}

impl fmt::Debug for HostApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostApi")
            .field("state", &self.emit_state.is_some())
            .field("action", &self.emit_action.is_some())
            .field("error", &self.emit_error.is_some())
            .finish()
    }
}
