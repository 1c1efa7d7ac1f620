use crate::js::prop_string;
use crate::wiring::{Bindings, Reporter};
use chirp_dom::{DomEvent, Element, Window};
use chirp_foundation::read_props;
use chirp_protocol::{Adapter, Cleanup, MountContext};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// `state_sync`: mirrors an input's value into a query parameter.
///
/// Props: `stateKey` (default `"value"`), `queryParam` (defaults to the
/// state key), `initial` (used when the parameter is absent). Markup:
/// `data-state-field` inputs. Clearing the input removes the parameter.
/// The location is replaced, never pushed.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateSync;

impl StateSync {
    /// Registered primitive name.
    pub const NAME: &'static str = "state_sync";
}

/// `url` with `param` set to `value`, or removed when `value` is empty.
///
/// Setting keeps the parameter's first position and drops repeats; other
/// parameters are untouched.
pub fn with_query_param(url: &Url, param: &str, value: &str) -> Url {
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    if value.is_empty() {
        pairs.retain(|(key, _)| key != param);
    } else {
        match pairs.iter().position(|(key, _)| key == param) {
            Some(first) => {
                pairs[first].1 = value.to_owned();
                let mut seen = 0;
                pairs.retain(|(key, _)| {
                    if key != param {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => pairs.push((param.to_owned(), value.to_owned())),
        }
    }

    let mut next = url.clone();
    if pairs.is_empty() {
        next.set_query(None);
    } else {
        next.query_pairs_mut().clear().extend_pairs(pairs);
    }
    next
}

struct Mirror {
    state_key: String,
    query_param: String,
    window: Window,
    reporter: Reporter,
}

impl Mirror {
    fn emit(&self, value: &str) {
        let mut state = serde_json::Map::new();
        state.insert(self.state_key.clone(), Value::from(value));
        self.reporter.state(Value::Object(state));
    }

    fn update(&self, value: String) {
        let next = with_query_param(&self.window.location(), &self.query_param, &value);
        self.window.replace_state(next);
        self.emit(&value);
    }
}

impl Adapter for StateSync {
    fn mount(&self, ctx: MountContext) -> Option<Cleanup> {
        let props = read_props(&ctx.payload);
        let root = ctx.payload.element();
        let state_key = prop_string(&props, "stateKey", "value");
        let query_param = prop_string(&props, "queryParam", &state_key);
        let initial = ctx
            .window
            .query_param(&query_param)
            .unwrap_or_else(|| prop_string(&props, "initial", ""));
        let inputs: Vec<Element> = root.query_selector_all("data-state-field");
        let mirror = Arc::new(Mirror {
            state_key,
            query_param,
            window: ctx.window.clone(),
            reporter: Reporter::new(&ctx),
        });

        let mut bindings = Bindings::new();
        for input in &inputs {
            let on_input = Arc::clone(&mirror);
            let source = input.downgrade();
            bindings.listen(input.events(), "input", move |_: &DomEvent| {
                let value = source
                    .upgrade()
                    .and_then(|input| input.value())
                    .unwrap_or_default();
                on_input.update(value);
            });
        }
        for input in &inputs {
            if input.value().is_some() {
                input.set_value(&initial);
            }
        }
        mirror.emit(&initial);

        Some(bindings.into_cleanup())
    }
}
