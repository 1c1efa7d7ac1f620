use crate::js::prop_string;
use crate::wiring::{Bindings, Reporter, fields};
use chirp_dom::{DomEvent, Element};
use chirp_foundation::read_props;
use chirp_protocol::{ActionStatus, Adapter, Cleanup, MountContext};
use indexmap::IndexSet;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

/// `grid_state`: text filter, sort toggle and row selection over a list of
/// rows.
///
/// Props: `stateKey` (default `"grid"`). Markup: `data-grid-filter` input,
/// `data-grid-sort` button, `data-grid-body` holding `data-grid-row`
/// elements, each with a `data-grid-id` and an optional `data-grid-select`
/// checkbox. Selection is reported in the order rows were selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Grid;

impl Grid {
    /// Registered primitive name.
    pub const NAME: &'static str = "grid_state";
}

struct GridState {
    rows: Vec<Element>,
    selected: IndexSet<String>,
    ascending: bool,
    filter: String,
}

struct View {
    state: Mutex<GridState>,
    state_key: String,
    filter_input: Option<Element>,
    body: Option<Element>,
    reporter: Reporter,
}

fn row_id(row: &Element) -> String {
    row.attribute("data-grid-id").unwrap_or_default()
}

fn direction(ascending: bool) -> &'static str {
    if ascending { "asc" } else { "desc" }
}

impl View {
    fn render(&self) {
        let (rows, selected, ascending, filter) = {
            let state = self.state.lock();
            (
                state.rows.clone(),
                state.selected.clone(),
                state.ascending,
                state.filter.clone(),
            )
        };
        for row in &rows {
            let text = row.text_content().to_lowercase();
            row.set_hidden(!filter.is_empty() && !text.contains(&filter));
            if let Some(checkbox) = row.query_selector("data-grid-select") {
                checkbox.set_checked(selected.contains(&row_id(row)));
            }
        }
        self.reporter.state(json!({
            "stateKey": self.state_key,
            "filter": filter,
            "selected": selected.iter().collect::<Vec<_>>(),
            "sort": direction(ascending),
        }));
    }

    fn on_filter(&self) {
        let value = self
            .filter_input
            .as_ref()
            .and_then(Element::value)
            .unwrap_or_default();
        self.state.lock().filter = value.trim().to_lowercase();
        self.render();
    }

    fn on_sort(&self) {
        let (rows, ascending) = {
            let mut state = self.state.lock();
            state.ascending = !state.ascending;
            let ascending = state.ascending;
            state.rows.sort_by(|a, b| {
                let (left, right) = (
                    a.text_content().to_lowercase(),
                    b.text_content().to_lowercase(),
                );
                if ascending { left.cmp(&right) } else { right.cmp(&left) }
            });
            (state.rows.clone(), ascending)
        };
        if let Some(body) = &self.body {
            for row in &rows {
                body.append_child(row);
            }
        }
        self.reporter.action(
            "sort",
            ActionStatus::Success,
            fields(json!({ "direction": direction(ascending) })),
        );
        self.render();
    }

    fn on_select(&self, row: &str, checked: bool) {
        let count = {
            let mut state = self.state.lock();
            if checked {
                state.selected.insert(row.to_owned());
            } else {
                state.selected.shift_remove(row);
            }
            state.selected.len()
        };
        self.reporter.action(
            "select",
            ActionStatus::Success,
            fields(json!({ "count": count })),
        );
        self.render();
    }
}

impl Adapter for Grid {
    fn mount(&self, ctx: MountContext) -> Option<Cleanup> {
        let props = read_props(&ctx.payload);
        let root = ctx.payload.element();
        let rows = root.query_selector_all("data-grid-row");
        let sort = root.query_selector("data-grid-sort");
        let view = Arc::new(View {
            state: Mutex::new(GridState {
                rows: rows.clone(),
                selected: IndexSet::new(),
                ascending: true,
                filter: String::new(),
            }),
            state_key: prop_string(&props, "stateKey", "grid"),
            filter_input: root.query_selector("data-grid-filter"),
            body: root.query_selector("data-grid-body"),
            reporter: Reporter::new(&ctx),
        });

        let mut bindings = Bindings::new();
        for row in &rows {
            let Some(checkbox) = row.query_selector("data-grid-select") else {
                continue;
            };
            let id = row_id(row);
            let on_change = Arc::clone(&view);
            let target = checkbox.downgrade();
            bindings.listen(checkbox.events(), "change", move |_: &DomEvent| {
                let checked = target.upgrade().is_some_and(|checkbox| checkbox.checked());
                on_change.on_select(&id, checked);
            });
        }
        let on_filter = Arc::clone(&view);
        bindings.on(view.filter_input.as_ref(), "input", move |_: &DomEvent| {
            on_filter.on_filter()
        });
        let on_sort = Arc::clone(&view);
        bindings.on(sort.as_ref(), "click", move |_: &DomEvent| on_sort.on_sort());
        view.render();

        Some(bindings.into_cleanup())
    }
}
