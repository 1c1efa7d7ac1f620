use crate::js::{js_string, prop_string, truthy};
use crate::wiring::{Bindings, Reporter, fields};
use chirp_dom::{DomEvent, Element};
use chirp_foundation::read_props;
use chirp_protocol::{ActionStatus, Adapter, Cleanup, MountContext};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;

/// `wizard_state`: one visible step at a time with next/previous buttons.
///
/// Props: `stateKey` (default `"wizard"`), `steps` (fallback step ids).
/// Markup: `data-wizard-step` (with optional `data-step-id`),
/// `data-wizard-next`, `data-wizard-prev`, `data-wizard-status`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wizard;

impl Wizard {
    /// Registered primitive name.
    pub const NAME: &'static str = "wizard_state";
}

struct View {
    index: Mutex<usize>,
    state_key: String,
    steps: Vec<Element>,
    step_ids: Vec<String>,
    next: Option<Element>,
    prev: Option<Element>,
    status: Option<Element>,
    reporter: Reporter,
}

impl View {
    fn render(&self) {
        let index = *self.index.lock();
        let total = self.steps.len();
        for (idx, node) in self.steps.iter().enumerate() {
            node.set_hidden(idx != index);
        }
        if let Some(prev) = &self.prev {
            prev.toggle_attribute("disabled", index == 0);
        }
        if let Some(next) = &self.next {
            next.toggle_attribute("disabled", index + 1 >= total);
        }
        if let Some(status) = &self.status {
            status.set_text_content(&format!("Step {} of {}", index + 1, total));
        }
        let step = self
            .step_ids
            .get(index)
            .filter(|id| !id.is_empty())
            .cloned()
            .unwrap_or_else(|| (index + 1).to_string());
        self.reporter.state(json!({
            "stateKey": self.state_key,
            "step": step,
            "index": index,
            "total": total,
        }));
    }

    fn go(&self, forward: bool) {
        let step = {
            let mut index = self.index.lock();
            if forward {
                if *index + 1 >= self.steps.len() {
                    return;
                }
                *index += 1;
            } else {
                if *index == 0 {
                    return;
                }
                *index -= 1;
            }
            self.step_ids.get(*index).cloned()
        };
        let action = if forward { "next" } else { "prev" };
        self.reporter.action(
            action,
            ActionStatus::Success,
            fields(json!({ "step": step })),
        );
        self.render();
    }
}

fn step_ids(steps: &[Element], configured: &[Value]) -> Vec<String> {
    steps
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            node.attribute("data-step-id")
                .filter(|id| !id.is_empty())
                .or_else(|| {
                    configured
                        .get(idx)
                        .filter(|value| truthy(Some(value)))
                        .map(js_string)
                })
                .unwrap_or_else(|| (idx + 1).to_string())
        })
        .collect()
}

impl Adapter for Wizard {
    fn mount(&self, ctx: MountContext) -> Option<Cleanup> {
        let props = read_props(&ctx.payload);
        let root = ctx.payload.element();
        let configured: &[Value] = match props.get("steps") {
            Some(Value::Array(steps)) => steps.as_slice(),
            _ => &[],
        };
        let steps = root.query_selector_all("data-wizard-step");
        let view = Arc::new(View {
            index: Mutex::new(0),
            state_key: prop_string(&props, "stateKey", "wizard"),
            step_ids: step_ids(&steps, configured),
            steps,
            next: root.query_selector("data-wizard-next"),
            prev: root.query_selector("data-wizard-prev"),
            status: root.query_selector("data-wizard-status"),
            reporter: Reporter::new(&ctx),
        });

        let mut bindings = Bindings::new();
        let on_next = Arc::clone(&view);
        bindings.on(view.next.as_ref(), "click", move |_: &DomEvent| {
            on_next.go(true)
        });
        let on_prev = Arc::clone(&view);
        bindings.on(view.prev.as_ref(), "click", move |_: &DomEvent| {
            on_prev.go(false)
        });
        view.render();

        Some(bindings.into_cleanup())
    }
}
