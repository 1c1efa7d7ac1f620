use chirp_dom::{Element, Window};
use chirp_protocol::test_utils::{RecordedEmission, RecordingHost, RecordingListener};
use chirp_protocol::{
    ActionStatus, Adapter, Cleanup, MountContext, MountPayload, Props, STATE_EVENT,
};
use chirp_store_memory::MemoryStore;
use chirp_widgets::{Counter, Grid, Wizard};
use serde_json::{Value, json};
use std::sync::Arc;

fn mark(tag: &str, marker: &str) -> Element {
    Element::new(tag).with_attr(marker, "")
}

fn mount(
    adapter: &dyn Adapter,
    window: &Window,
    payload: MountPayload,
    host: &RecordingHost,
) -> Cleanup {
    let ctx = MountContext::new(payload, window.clone(), Arc::new(MemoryStore::new()))
        .with_api(Some(host.api()));
    adapter.mount(ctx).unwrap()
}

fn window() -> Window {
    Window::new("https://example.test/page").unwrap()
}

fn actions(host: &RecordingHost) -> Vec<(String, ActionStatus, Props)> {
    host.emissions()
        .into_iter()
        .filter_map(|e| match e {
            RecordedEmission::Action {
                action,
                status,
                extra,
            } => Some((action, status, extra)),
            _ => None,
        })
        .collect()
}

fn extra(value: Value) -> Props {
    value.as_object().cloned().unwrap_or_default()
}

// ━━━ Counter ━━━

struct CounterMarkup {
    root: Element,
    value: Element,
    plus: Element,
    minus: Element,
}

fn counter_markup() -> CounterMarkup {
    let value = mark("span", "data-counter-value");
    let plus = mark("button", "data-counter-plus");
    let minus = mark("button", "data-counter-minus");
    let root = Element::new("div")
        .with_child(minus.clone())
        .with_child(value.clone())
        .with_child(plus.clone());
    CounterMarkup {
        root,
        value,
        plus,
        minus,
    }
}

#[test]
fn counter_renders_its_seed() {
    let markup = counter_markup();
    let host = RecordingHost::new();
    let payload =
        MountPayload::new(markup.root.clone(), Counter::NAME).with_props(json!({"seed": "3"}));

    let _cleanup = mount(&Counter, &window(), payload, &host);

    assert_eq!(host.states(), vec![json!({"count": 3})]);
    assert_eq!(markup.value.text_content(), "3");
}

#[test]
fn counter_clicks_report_state_then_action() {
    let markup = counter_markup();
    let host = RecordingHost::new();
    let payload =
        MountPayload::new(markup.root.clone(), Counter::NAME).with_props(json!({"seed": 3}));
    let _cleanup = mount(&Counter, &window(), payload, &host);

    markup.plus.click();
    assert_eq!(
        host.emissions()[1..],
        [
            RecordedEmission::State(json!({"count": 4})),
            RecordedEmission::Action {
                action: "increment".into(),
                status: ActionStatus::Success,
                extra: Props::new(),
            },
        ]
    );

    markup.minus.click();
    markup.minus.click();
    assert_eq!(host.states().last(), Some(&json!({"count": 2})));
    assert_eq!(markup.value.text_content(), "2");
    assert_eq!(actions(&host).last().unwrap().0, "decrement");
}

#[test]
fn counter_without_seed_starts_at_zero() {
    let markup = counter_markup();
    let host = RecordingHost::new();
    let _cleanup = mount(
        &Counter,
        &window(),
        MountPayload::new(markup.root.clone(), Counter::NAME),
        &host,
    );
    assert_eq!(host.states(), vec![json!({"count": 0})]);
}

#[test]
fn counter_cleanup_detaches_buttons() {
    let markup = counter_markup();
    let host = RecordingHost::new();
    let cleanup = mount(
        &Counter,
        &window(),
        MountPayload::new(markup.root.clone(), Counter::NAME),
        &host,
    );

    cleanup.run();
    markup.plus.click();

    assert_eq!(host.emissions().len(), 1);
    assert_eq!(markup.plus.events().listener_count("click"), 0);
    assert_eq!(markup.minus.events().listener_count("click"), 0);
}

#[test]
fn counter_without_buttons_still_mounts() {
    let host = RecordingHost::new();
    let root = Element::new("div");
    let _cleanup = mount(&Counter, &window(), MountPayload::new(root, Counter::NAME), &host);
    assert_eq!(host.states(), vec![json!({"count": 0})]);
}

#[test]
fn counter_broadcasts_without_host_api() {
    let markup = counter_markup();
    let window = window();
    let seen = RecordingListener::attach(window.document().events(), STATE_EVENT);
    let payload = MountPayload::new(markup.root.clone(), Counter::NAME)
        .with_id("c1")
        .with_props(json!({"seed": "3"}));
    let ctx = MountContext::new(payload, window.clone(), Arc::new(MemoryStore::new()));
    let _cleanup = Counter.mount(ctx);

    markup.plus.click();

    assert_eq!(
        seen.details(),
        vec![
            json!({"name": "counter-widget", "id": "c1", "version": null, "state": {"count": 3}}),
            json!({"name": "counter-widget", "id": "c1", "version": null, "state": {"count": 4}}),
        ]
    );
}

// ━━━ Wizard ━━━

struct WizardMarkup {
    root: Element,
    steps: Vec<Element>,
    next: Element,
    prev: Element,
    status: Element,
}

fn wizard_markup() -> WizardMarkup {
    let steps = vec![
        mark("fieldset", "data-wizard-step").with_attr("data-step-id", "account"),
        mark("fieldset", "data-wizard-step"),
        mark("fieldset", "data-wizard-step").with_attr("data-step-id", "confirm"),
    ];
    let next = mark("button", "data-wizard-next");
    let prev = mark("button", "data-wizard-prev");
    let status = mark("p", "data-wizard-status");
    let mut root = Element::new("form");
    for step in &steps {
        root = root.with_child(step.clone());
    }
    let root = root
        .with_child(prev.clone())
        .with_child(next.clone())
        .with_child(status.clone());
    WizardMarkup {
        root,
        steps,
        next,
        prev,
        status,
    }
}

fn visible(steps: &[Element]) -> Vec<bool> {
    steps.iter().map(|step| !step.hidden()).collect()
}

#[test]
fn wizard_starts_on_the_first_step() {
    let markup = wizard_markup();
    let host = RecordingHost::new();
    let payload = MountPayload::new(markup.root.clone(), Wizard::NAME)
        .with_props(json!({"stateKey": "signup", "steps": ["a", "profile", "c"]}));
    let _cleanup = mount(&Wizard, &window(), payload, &host);

    assert_eq!(
        host.states(),
        vec![json!({"stateKey": "signup", "step": "account", "index": 0, "total": 3})]
    );
    assert_eq!(visible(&markup.steps), vec![true, false, false]);
    assert!(markup.prev.disabled());
    assert!(!markup.next.disabled());
    assert_eq!(markup.status.text_content(), "Step 1 of 3");
}

#[test]
fn wizard_steps_forward_and_back() {
    let markup = wizard_markup();
    let host = RecordingHost::new();
    let payload = MountPayload::new(markup.root.clone(), Wizard::NAME)
        .with_props(json!({"steps": ["a", "profile", "c"]}));
    let _cleanup = mount(&Wizard, &window(), payload, &host);

    assert!(markup.next.click());
    assert_eq!(
        actions(&host),
        vec![("next".to_owned(), ActionStatus::Success, extra(json!({"step": "profile"})))]
    );
    assert_eq!(
        host.states().last().unwrap(),
        &json!({"stateKey": "wizard", "step": "profile", "index": 1, "total": 3})
    );
    assert_eq!(visible(&markup.steps), vec![false, true, false]);

    markup.next.click();
    assert!(markup.next.disabled());
    assert!(!markup.next.click());
    assert_eq!(markup.status.text_content(), "Step 3 of 3");

    markup.prev.click();
    assert_eq!(actions(&host).last().unwrap().0, "prev");
    assert_eq!(host.states().last().unwrap()["step"], "profile");
}

#[test]
fn wizard_falls_back_to_ordinals() {
    let step = mark("fieldset", "data-wizard-step");
    let root = Element::new("form")
        .with_child(step)
        .with_child(mark("fieldset", "data-wizard-step"));
    let host = RecordingHost::new();
    let _cleanup = mount(&Wizard, &window(), MountPayload::new(root, Wizard::NAME), &host);

    assert_eq!(host.states()[0]["step"], "1");
    assert_eq!(host.states()[0]["total"], 2);
}

#[test]
fn wizard_without_steps_reports_step_one() {
    let host = RecordingHost::new();
    let _cleanup = mount(
        &Wizard,
        &window(),
        MountPayload::new(Element::new("form"), Wizard::NAME),
        &host,
    );
    assert_eq!(
        host.states(),
        vec![json!({"stateKey": "wizard", "step": "1", "index": 0, "total": 0})]
    );
}

// ━━━ Grid ━━━

struct GridMarkup {
    root: Element,
    filter: Element,
    sort: Element,
    body: Element,
    rows: Vec<(Element, Element)>,
}

fn grid_markup() -> GridMarkup {
    let filter = mark("input", "data-grid-filter");
    let sort = mark("button", "data-grid-sort");
    let body = mark("tbody", "data-grid-body");
    let mut rows = Vec::new();
    for (id, label) in [("b", "Banana"), ("a", "apple"), ("c", "Cherry")] {
        let checkbox = mark("input", "data-grid-select");
        let row = mark("tr", "data-grid-row")
            .with_attr("data-grid-id", id)
            .with_text(label)
            .with_child(checkbox.clone());
        body.append_child(&row);
        rows.push((row, checkbox));
    }
    let root = Element::new("div")
        .with_child(filter.clone())
        .with_child(sort.clone())
        .with_child(body.clone());
    GridMarkup {
        root,
        filter,
        sort,
        body,
        rows,
    }
}

fn labels(body: &Element) -> Vec<String> {
    body.children().iter().map(Element::text_content).collect()
}

#[test]
fn grid_reports_initial_state() {
    let markup = grid_markup();
    let host = RecordingHost::new();
    let _cleanup = mount(
        &Grid,
        &window(),
        MountPayload::new(markup.root.clone(), Grid::NAME),
        &host,
    );
    assert_eq!(
        host.states(),
        vec![json!({"stateKey": "grid", "filter": "", "selected": [], "sort": "asc"})]
    );
}

#[test]
fn grid_filter_hides_non_matching_rows() {
    let markup = grid_markup();
    let host = RecordingHost::new();
    let _cleanup = mount(
        &Grid,
        &window(),
        MountPayload::new(markup.root.clone(), Grid::NAME),
        &host,
    );

    markup.filter.input("  AN ");

    let hidden: Vec<bool> = markup.rows.iter().map(|(row, _)| row.hidden()).collect();
    assert_eq!(hidden, vec![false, true, true]);
    assert_eq!(host.states().last().unwrap()["filter"], "an");

    markup.filter.input("");
    assert!(markup.rows.iter().all(|(row, _)| !row.hidden()));
}

#[test]
fn grid_sort_toggles_direction_and_reorders_rows() {
    let markup = grid_markup();
    let host = RecordingHost::new();
    let _cleanup = mount(
        &Grid,
        &window(),
        MountPayload::new(markup.root.clone(), Grid::NAME),
        &host,
    );

    markup.sort.click();
    assert_eq!(labels(&markup.body), vec!["Cherry", "Banana", "apple"]);
    assert_eq!(
        actions(&host),
        vec![("sort".to_owned(), ActionStatus::Success, extra(json!({"direction": "desc"})))]
    );
    assert_eq!(host.states().last().unwrap()["sort"], "desc");

    markup.sort.click();
    assert_eq!(labels(&markup.body), vec!["apple", "Banana", "Cherry"]);
}

#[test]
fn grid_selection_follows_checkboxes() {
    let markup = grid_markup();
    let host = RecordingHost::new();
    let _cleanup = mount(
        &Grid,
        &window(),
        MountPayload::new(markup.root.clone(), Grid::NAME),
        &host,
    );

    markup.rows[2].1.toggle(true);
    markup.rows[0].1.toggle(true);
    assert_eq!(host.states().last().unwrap()["selected"], json!(["c", "b"]));
    assert_eq!(actions(&host).last().unwrap().2, extra(json!({"count": 2})));

    markup.rows[2].1.toggle(false);
    assert_eq!(host.states().last().unwrap()["selected"], json!(["b"]));
    assert!(markup.rows[0].1.checked());
}

#[test]
fn grid_cleanup_removes_every_listener() {
    let markup = grid_markup();
    let host = RecordingHost::new();
    let cleanup = mount(
        &Grid,
        &window(),
        MountPayload::new(markup.root.clone(), Grid::NAME),
        &host,
    );

    cleanup.run();
    markup.filter.input("x");
    markup.sort.click();
    markup.rows[0].1.toggle(true);

    assert_eq!(host.emissions().len(), 1);
    assert_eq!(markup.filter.events().listener_count("input"), 0);
    assert!(markup.rows.iter().all(|(_, cb)| cb.events().listener_count("change") == 0));
}
