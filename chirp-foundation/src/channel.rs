use chirp_dom::{DomEvent, EventTarget, Window};
use chirp_protocol::{
    ActionStatus, Emitter, EventKind, HostApi, IslandEvent, IslandIdentity, MountPayload, Props,
};
use serde_json::Value;

/// Delivers events as custom events on the document and then the window.
///
/// Every emission goes to both targets, so a listener bound on either scope
/// sees each event exactly once. Listener failures are the listener's own
/// business; the broadcaster never inspects them.
#[derive(Clone, Debug)]
pub struct Broadcaster {
    document: EventTarget,
    window: EventTarget,
}

impl Broadcaster {
    /// Broadcast on `window`'s document and on `window` itself.
    pub fn new(window: &Window) -> Self {
        Self {
            document: window.document().events().clone(),
            window: window.events().clone(),
        }
    }
}

impl Emitter for Broadcaster {
    fn supports(&self, _kind: EventKind) -> bool {
        true
    }

    fn emit(&self, source: &IslandIdentity, event: &IslandEvent) {
        let dom_event = DomEvent::custom(
            event.kind().event_name(),
            event.detail(source).into_value(),
        );
        let document = self.document.dispatch_event(&dom_event);
        let window = self.window.dispatch_event(&dom_event);
        tracing::trace!(
            event = dom_event.event_type(),
            document,
            window,
            "chirp.channel.broadcast"
        );
    }
}

/// The emission entry point islands call.
///
/// Each emission goes through the host API when it handles that kind and
/// through the [`Broadcaster`] otherwise, decided per call. The channel
/// never touches elements.
#[derive(Clone, Debug)]
pub struct EventChannel {
    broadcast: Broadcaster,
}

impl EventChannel {
    /// A channel broadcasting on `window`.
    pub fn new(window: &Window) -> Self {
        Self {
            broadcast: Broadcaster::new(window),
        }
    }

    /// Route one event on behalf of `source`.
    ///
    /// Takes only the island's identity, so callers that outlive the mount
    /// (listeners, timers) need not hold the element.
    pub fn emit(&self, source: &IslandIdentity, api: Option<&HostApi>, event: IslandEvent) {
        let kind = event.kind();
        match api.filter(|api| api.supports(kind)) {
            Some(api) => {
                tracing::debug!(
                    island = source.name(),
                    ?kind,
                    route = "host",
                    "chirp.channel.emit"
                );
                api.emit(source, &event);
            }
            None => {
                tracing::debug!(
                    island = source.name(),
                    ?kind,
                    route = "broadcast",
                    "chirp.channel.emit"
                );
                self.broadcast.emit(source, &event);
            }
        }
    }

    /// Report a state snapshot.
    pub fn set_state(&self, payload: &MountPayload, api: Option<&HostApi>, state: Value) {
        self.emit(payload.identity(), api, IslandEvent::State(state));
    }

    /// Report an action outcome. `extra` fields are merged into the
    /// broadcast detail after `action` and `status`.
    pub fn set_action(
        &self,
        payload: &MountPayload,
        api: Option<&HostApi>,
        action: &str,
        status: ActionStatus,
        extra: Props,
    ) {
        self.emit(
            payload.identity(),
            api,
            IslandEvent::Action {
                action: action.to_owned(),
                status,
                extra,
            },
        );
    }

    /// Report an error. An `id` in `extra` overrides the payload's id and
    /// targets the boundary with that id.
    pub fn set_error(
        &self,
        payload: &MountPayload,
        api: Option<&HostApi>,
        reason: &str,
        extra: Props,
    ) {
        self.emit(
            payload.identity(),
            api,
            IslandEvent::Error {
                reason: reason.to_owned(),
                extra,
            },
        );
    }
}
