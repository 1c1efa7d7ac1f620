use crate::js::{number_string, number_value, to_number};
use crate::wiring::{Bindings, Reporter};
use chirp_dom::{DomEvent, Element};
use chirp_foundation::read_props;
use chirp_protocol::{ActionStatus, Adapter, Cleanup, MountContext, Props};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

/// `counter-widget`: a number with plus and minus buttons.
///
/// Props: `seed` (initial count, default 0). Markup: `data-counter-value`,
/// `data-counter-plus`, `data-counter-minus`. Emits `{count}` on every
/// change and `increment`/`decrement` actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Counter;

impl Counter {
    /// Registered primitive name.
    pub const NAME: &'static str = "counter-widget";
}

struct View {
    count: Mutex<f64>,
    value_node: Option<Element>,
    reporter: Reporter,
}

impl View {
    fn render(&self, count: f64) {
        if let Some(node) = &self.value_node {
            node.set_text_content(&number_string(count));
        }
        self.reporter.state(json!({ "count": number_value(count) }));
    }

    fn step(&self, delta: f64, action: &str) {
        let count = {
            let mut count = self.count.lock();
            *count += delta;
            *count
        };
        self.render(count);
        self.reporter.action(action, ActionStatus::Success, Props::new());
    }
}

impl Adapter for Counter {
    fn mount(&self, ctx: MountContext) -> Option<Cleanup> {
        let props = read_props(&ctx.payload);
        let root = ctx.payload.element();
        let plus = root.query_selector("data-counter-plus");
        let minus = root.query_selector("data-counter-minus");
        let seed = to_number(props.get("seed"));
        let view = Arc::new(View {
            count: Mutex::new(seed),
            value_node: root.query_selector("data-counter-value"),
            reporter: Reporter::new(&ctx),
        });

        let mut bindings = Bindings::new();
        let inc = Arc::clone(&view);
        bindings.on(plus.as_ref(), "click", move |_: &DomEvent| {
            inc.step(1.0, "increment")
        });
        let dec = Arc::clone(&view);
        bindings.on(minus.as_ref(), "click", move |_: &DomEvent| {
            dec.step(-1.0, "decrement")
        });
        view.render(seed);

        Some(bindings.into_cleanup())
    }
}
