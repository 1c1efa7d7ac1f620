//! Plumbing shared by every widget: reporting, listener bookkeeping and
//! timers owned by one mount.

use chirp_dom::{DomEvent, Element, EventTarget, ListenerId, TimerId, Timers};
use chirp_foundation::EventChannel;
use chirp_protocol::{
    ActionStatus, Cleanup, HostApi, IslandEvent, IslandIdentity, MountContext, Props,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Emits on behalf of one mount. Holds the island's identity, never its
/// element.
#[derive(Clone)]
pub(crate) struct Reporter {
    channel: EventChannel,
    source: IslandIdentity,
    api: Option<HostApi>,
}

impl Reporter {
    pub(crate) fn new(ctx: &MountContext) -> Self {
        Self {
            channel: EventChannel::new(&ctx.window),
            source: ctx.payload.identity().clone(),
            api: ctx.api.clone(),
        }
    }

    pub(crate) fn identity(&self) -> &IslandIdentity {
        &self.source
    }

    pub(crate) fn state(&self, state: Value) {
        self.channel.emit(&self.source, self.api.as_ref(), IslandEvent::State(state));
    }

    pub(crate) fn action(&self, action: &str, status: ActionStatus, extra: Props) {
        let event = IslandEvent::Action {
            action: action.to_owned(),
            status,
            extra,
        };
        self.channel.emit(&self.source, self.api.as_ref(), event);
    }
}

/// The fields of a `json!` object literal.
pub(crate) fn fields(value: Value) -> Props {
    match value {
        Value::Object(map) => map,
        _ => Props::new(),
    }
}

/// Timers scheduled by one mount. Cleared together at unmount.
#[derive(Clone)]
pub(crate) struct MountTimers {
    timers: Timers,
    owned: Arc<Mutex<Vec<TimerId>>>,
}

impl MountTimers {
    pub(crate) fn new(timers: &Timers) -> Self {
        Self {
            timers: timers.clone(),
            owned: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn timeout(
        &self,
        delay: Duration,
        callback: impl FnOnce() + Send + 'static,
    ) -> Option<TimerId> {
        let scheduled = self.timers.set_timeout(delay, callback);
        self.track(scheduled)
    }

    pub(crate) fn interval(
        &self,
        period: Duration,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Option<TimerId> {
        let scheduled = self.timers.set_interval(period, callback);
        self.track(scheduled)
    }

    pub(crate) fn clear(&self, id: TimerId) {
        self.owned.lock().retain(|owned| *owned != id);
        self.timers.clear(id);
    }

    pub(crate) fn clear_all(&self) {
        let owned = std::mem::take(&mut *self.owned.lock());
        for id in owned {
            self.timers.clear(id);
        }
    }

    fn track(&self, scheduled: Result<TimerId, chirp_dom::DomError>) -> Option<TimerId> {
        match scheduled {
            Ok(id) => {
                let mut owned = self.owned.lock();
                owned.retain(|pending| self.timers.is_pending(*pending));
                owned.push(id);
                Some(id)
            }
            Err(err) => {
                tracing::warn!(error = %err, "chirp.widget.timer");
                None
            }
        }
    }
}

/// Listeners and timers one mount owns; turned into its cleanup.
#[derive(Default)]
pub(crate) struct Bindings {
    listeners: Vec<(EventTarget, ListenerId)>,
    timers: Option<MountTimers>,
}

impl Bindings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Clear these timers at cleanup as well.
    pub(crate) fn with_timers(mut self, timers: &MountTimers) -> Self {
        self.timers = Some(timers.clone());
        self
    }

    pub(crate) fn listen(
        &mut self,
        target: &EventTarget,
        event_type: &str,
        listener: impl Fn(&DomEvent) + Send + Sync + 'static,
    ) {
        let id = target.add_event_listener(event_type, listener);
        self.listeners.push((target.clone(), id));
    }

    /// Listen on `element` when the markup has it.
    pub(crate) fn on(
        &mut self,
        element: Option<&Element>,
        event_type: &str,
        listener: impl Fn(&DomEvent) + Send + Sync + 'static,
    ) {
        if let Some(element) = element {
            self.listen(element.events(), event_type, listener);
        }
    }

    pub(crate) fn into_cleanup(self) -> Cleanup {
        Cleanup::new(move || {
            for (target, id) in self.listeners {
                target.remove_event_listener(id);
            }
            if let Some(timers) = self.timers {
                timers.clear_all();
            }
        })
    }
}
