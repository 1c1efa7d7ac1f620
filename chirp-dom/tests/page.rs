use chirp_dom::{DomEvent, Element, EventTarget, Window};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

// --- Elements ---

#[test]
fn query_selector_walks_descendants_in_document_order() {
    let first = Element::new("span").with_attr("data-item", "a");
    let nested = Element::new("span").with_attr("data-item", "b");
    let root = Element::new("div")
        .with_child(first.clone())
        .with_child(Element::new("div").with_child(nested.clone()));

    assert_eq!(root.query_selector("data-item"), Some(first.clone()));
    assert_eq!(root.query_selector_all("data-item"), vec![first, nested]);
    assert!(root.query_selector("data-missing").is_none());
}

#[test]
fn query_selector_excludes_the_root_itself() {
    let root = Element::new("div").with_attr("data-item", "");
    assert!(root.query_selector("data-item").is_none());
}

#[test]
fn text_content_concatenates_descendants() {
    let row = Element::new("tr")
        .with_text("Alpha ")
        .with_child(Element::new("td").with_text("one"));
    assert_eq!(row.text_content(), "Alpha one");

    row.set_text_content("replaced");
    assert_eq!(row.text_content(), "replaced");
    assert!(row.children().is_empty());
}

#[test]
fn append_child_moves_between_parents() {
    let child = Element::new("li");
    let a = Element::new("ul").with_child(child.clone());
    let b = Element::new("ul");

    b.append_child(&child);

    assert!(a.children().is_empty());
    assert_eq!(b.children(), vec![child.clone()]);
    assert_eq!(child.parent(), Some(b));
}

#[test]
fn toggle_attribute_adds_and_removes() {
    let button = Element::new("button");
    button.toggle_attribute("disabled", true);
    assert!(button.disabled());
    button.toggle_attribute("disabled", false);
    assert!(!button.disabled());
}

#[test]
fn form_controls_start_with_an_empty_value() {
    assert_eq!(Element::new("input").value().as_deref(), Some(""));
    assert_eq!(Element::new("textarea").value().as_deref(), Some(""));
    assert!(Element::new("div").value().is_none());
    assert_eq!(Element::new("div").with_value("x").value().as_deref(), Some("x"));
}

#[test]
fn disabled_elements_swallow_clicks() {
    let button = Element::new("button");
    let clicks = counter();
    let seen = Arc::clone(&clicks);
    button.add_event_listener("click", move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    assert!(button.click());
    button.set_attribute("disabled", "disabled");
    assert!(!button.click());
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn weak_element_does_not_keep_element_alive() {
    let element = Element::new("div");
    let weak = element.downgrade();
    assert_eq!(weak.upgrade(), Some(element.clone()));

    drop(element);
    assert!(weak.is_detached());
    assert!(weak.upgrade().is_none());
}

// --- Event targets ---

#[test]
fn listeners_run_in_registration_order_and_filter_by_type() {
    let target = EventTarget::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    for name in ["first", "second"] {
        let log = Arc::clone(&log);
        target.add_event_listener("ping", move |_| log.lock().unwrap().push(name));
    }
    let other = Arc::clone(&log);
    target.add_event_listener("pong", move |_| other.lock().unwrap().push("pong"));

    assert_eq!(target.dispatch_event(&DomEvent::new("ping")), 2);
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn removed_listener_is_not_called() {
    let target = EventTarget::new();
    let calls = counter();
    let seen = Arc::clone(&calls);
    let id = target.add_event_listener("ping", move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    assert!(target.remove_event_listener(id));
    assert!(!target.remove_event_listener(id));
    target.dispatch_event(&DomEvent::new("ping"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(target.listener_count("ping"), 0);
}

#[test]
fn listener_may_remove_itself_during_dispatch() {
    let target = EventTarget::new();
    let calls = counter();
    let slot = Arc::new(Mutex::new(None));

    let seen = Arc::clone(&calls);
    let own_id = Arc::clone(&slot);
    let handle = target.clone();
    let id = target.add_event_listener("ping", move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = own_id.lock().unwrap().take() {
            handle.remove_event_listener(id);
        }
    });
    *slot.lock().unwrap() = Some(id);

    target.dispatch_event(&DomEvent::new("ping"));
    target.dispatch_event(&DomEvent::new("ping"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn custom_event_carries_detail() {
    let event = DomEvent::custom("chirp:test", serde_json::json!({"a": 1}));
    assert_eq!(event.event_type(), "chirp:test");
    assert_eq!(event.detail(), Some(&serde_json::json!({"a": 1})));
    assert!(DomEvent::new("click").detail().is_none());
}

// --- Window ---

#[tokio::test]
async fn replace_state_rewrites_location_without_new_entry() {
    let window = Window::new("https://example.test/page?q=1").unwrap();
    assert_eq!(window.query_param("q").as_deref(), Some("1"));

    let mut next = window.location();
    next.set_query(Some("q=2"));
    window.replace_state(next);

    assert_eq!(window.query_param("q").as_deref(), Some("2"));
    assert_eq!(window.history_len(), 1);

    let mut pushed = window.location();
    pushed.set_query(None);
    window.push_state(pushed);
    assert_eq!(window.history_len(), 2);
    assert!(window.query_param("q").is_none());
}

#[test]
fn invalid_location_is_rejected() {
    assert!(Window::new("not a url").is_err());
}

// --- Timers ---

#[tokio::test(start_paused = true)]
async fn timeout_fires_once_after_delay() {
    let window = Window::new("https://example.test/").unwrap();
    let fired = counter();
    let seen = Arc::clone(&fired);
    let id = window
        .timers()
        .set_timeout(Duration::from_millis(100), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert_eq!(window.timers().pending(), 1);
    assert!(window.timers().is_pending(id));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(window.timers().pending(), 0);
    assert!(!window.timers().is_pending(id));
}

#[tokio::test(start_paused = true)]
async fn cleared_timeout_never_fires() {
    let window = Window::new("https://example.test/").unwrap();
    let fired = counter();
    let seen = Arc::clone(&fired);
    let id = window
        .timers()
        .set_timeout(Duration::from_millis(100), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    assert!(window.timers().clear(id));
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(!window.timers().clear(id));
}

#[tokio::test(start_paused = true)]
async fn interval_ticks_until_cleared() {
    let window = Window::new("https://example.test/").unwrap();
    let ticks = counter();
    let seen = Arc::clone(&ticks);
    let id = window
        .timers()
        .set_interval(Duration::from_millis(100), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 3);

    window.timers().clear(id);
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
}
