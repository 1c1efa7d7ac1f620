use crate::js::prop_string;
use crate::timings::WidgetTimings;
use crate::wiring::{Bindings, MountTimers, Reporter};
use chirp_dom::{DomEvent, Element};
use chirp_foundation::read_props;
use chirp_protocol::{ActionStatus, Adapter, Cleanup, MountContext, Props};
use serde_json::json;
use std::sync::Arc;

/// `action_queue`: a button that runs a simulated slow action.
///
/// Props: `actionId` (default `"action"`), used as the action name.
/// Markup: `data-action-trigger` button (set `data-action-fail="true"` to
/// make the action fail) and a `data-action-status` node, which also gets a
/// `data-status` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionQueue {
    timings: WidgetTimings,
}

impl ActionQueue {
    /// Registered primitive name.
    pub const NAME: &'static str = "action_queue";

    /// An action queue with the given simulated delay.
    pub fn new(timings: WidgetTimings) -> Self {
        Self { timings }
    }
}

struct Queue {
    action_id: String,
    status_node: Option<Element>,
    trigger: Option<Element>,
    reporter: Reporter,
    timers: MountTimers,
    timings: WidgetTimings,
}

impl Queue {
    fn render(&self, status: &str, message: &str) {
        if let Some(node) = &self.status_node {
            node.set_text_content(message);
            node.set_attribute("data-status", status);
        }
        self.reporter.state(json!({
            "actionId": self.action_id,
            "status": status,
            "message": message,
        }));
    }

    fn run(self: &Arc<Self>) {
        if let Some(trigger) = &self.trigger {
            trigger.set_attribute("disabled", "disabled");
        }
        self.render(ActionStatus::Pending.as_str(), "Working...");
        self.reporter
            .action(&self.action_id, ActionStatus::Pending, Props::new());

        let queue = Arc::clone(self);
        if self
            .timers
            .timeout(self.timings.action_delay(), move || queue.finish())
            .is_none()
        {
            self.finish();
        }
    }

    fn finish(&self) {
        let should_fail = self
            .trigger
            .as_ref()
            .and_then(|trigger| trigger.attribute("data-action-fail"))
            .is_some_and(|flag| flag == "true");
        let (status, message) = if should_fail {
            (ActionStatus::Error, "Failed. Retry.")
        } else {
            (ActionStatus::Success, "Done.")
        };
        self.render(status.as_str(), message);
        self.reporter.action(&self.action_id, status, Props::new());
        if let Some(trigger) = &self.trigger {
            trigger.remove_attribute("disabled");
        }
    }
}

impl Adapter for ActionQueue {
    fn mount(&self, ctx: MountContext) -> Option<Cleanup> {
        let props = read_props(&ctx.payload);
        let root = ctx.payload.element();
        let timers = MountTimers::new(ctx.window.timers());
        let queue = Arc::new(Queue {
            action_id: prop_string(&props, "actionId", "action"),
            status_node: root.query_selector("data-action-status"),
            trigger: root.query_selector("data-action-trigger"),
            reporter: Reporter::new(&ctx),
            timers: timers.clone(),
            timings: self.timings,
        });

        let mut bindings = Bindings::new().with_timers(&timers);
        let on_click = Arc::clone(&queue);
        bindings.on(queue.trigger.as_ref(), "click", move |_: &DomEvent| {
            on_click.run()
        });
        queue.render("idle", "Ready.");

        Some(bindings.into_cleanup())
    }
}
