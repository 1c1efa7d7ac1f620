//! Island events and the detail objects they broadcast as.

use crate::payload::{IslandIdentity, Props};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Event name for state snapshots.
pub const STATE_EVENT: &str = "chirp:island:state";
/// Event name for action outcomes.
pub const ACTION_EVENT: &str = "chirp:island:action";
/// Event name for error signals.
pub const ERROR_EVENT: &str = "chirp:island:error";
/// Value of the `error` field on every broadcast error detail.
pub const ERROR_MARKER: &str = "primitive";

/// The three kinds of emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A state snapshot.
    State,
    /// An action outcome.
    Action,
    /// An error signal.
    Error,
}

impl EventKind {
    /// All kinds, in a fixed order.
    pub const ALL: [EventKind; 3] = [EventKind::State, EventKind::Action, EventKind::Error];

    /// The broadcast event name for this kind.
    pub fn event_name(self) -> &'static str {
        match self {
            EventKind::State => STATE_EVENT,
            EventKind::Action => ACTION_EVENT,
            EventKind::Error => ERROR_EVENT,
        }
    }
}

/// Where an action stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// Started, not finished.
    Pending,
    /// Finished successfully.
    Success,
    /// Finished with an error.
    Error,
}

impl ActionStatus {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Pending => "pending",
            ActionStatus::Success => "success",
            ActionStatus::Error => "error",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emission, before it is routed.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum IslandEvent {
    /// A state snapshot.
    State(Value),
    /// An action outcome.
    Action {
        /// Action name.
        action: String,
        /// Outcome.
        status: ActionStatus,
        /// Extra fields merged into the detail.
        extra: Props,
    },
    /// An error signal.
    Error {
        /// Why the island failed.
        reason: String,
        /// Extra fields merged into the detail. An `id` here targets a
        /// specific boundary.
        extra: Props,
    },
}

impl IslandEvent {
    /// Which kind of emission this is.
    pub fn kind(&self) -> EventKind {
        match self {
            IslandEvent::State(_) => EventKind::State,
            IslandEvent::Action { .. } => EventKind::Action,
            IslandEvent::Error { .. } => EventKind::Error,
        }
    }

    /// The broadcast detail for this event on behalf of `source`.
    ///
    /// Starts from the island identity, adds the kind fields, then merges
    /// `extra` last so extra keys win.
    pub fn detail(&self, source: &IslandIdentity) -> EventDetail {
        let mut detail = EventDetail::for_identity(source);
        match self {
            IslandEvent::State(state) => {
                detail.insert("state", state.clone());
            }
            IslandEvent::Action {
                action,
                status,
                extra,
            } => {
                detail.insert("action", Value::from(action.as_str()));
                detail.insert("status", Value::from(status.as_str()));
                detail.merge(extra);
            }
            IslandEvent::Error { reason, extra } => {
                detail.insert("error", Value::from(ERROR_MARKER));
                detail.insert("reason", Value::from(reason.as_str()));
                detail.merge(extra);
            }
        }
        detail
    }
}

/// The public detail object of a broadcast event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventDetail(Props);

impl EventDetail {
    /// `{name, id, version}` of the island. Props are never copied.
    pub fn for_identity(source: &IslandIdentity) -> Self {
        let mut fields = Props::new();
        fields.insert("name".into(), Value::from(source.name()));
        fields.insert("id".into(), optional(source.id()));
        fields.insert("version".into(), optional(source.version()));
        Self(fields)
    }

    /// Set one field, replacing any previous value.
    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_owned(), value);
    }

    /// Copy every field of `extra` over this detail.
    pub fn merge(&mut self, extra: &Props) {
        for (key, value) in extra {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Read one field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The fields.
    pub fn fields(&self) -> &Props {
        &self.0
    }

    /// Convert into a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

fn optional(value: Option<&str>) -> Value {
    value.map_or(Value::Null, Value::from)
}
