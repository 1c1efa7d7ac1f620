use chirp::prelude::*;
use chirp::{ConfigError, ISLAND_ATTR, payload_from_markers};
use chirp_protocol::test_utils::{EchoAdapter, RecordingHost};
use chirp_protocol::{MountError, RegistryError};
use serde_json::json;
use std::sync::Arc;

fn islands(config: &IslandsConfig) -> Islands {
    let window = Window::new("https://example.test/page").unwrap();
    Islands::bootstrap(window, Arc::new(MemoryStore::new()), config).unwrap()
}

fn counter_island(props: &str) -> (Element, Element) {
    let plus = Element::new("button").with_attr("data-counter-plus", "");
    let root = Element::new("div")
        .with_attr(ISLAND_ATTR, "counter-widget")
        .with_attr("data-island-id", "c1")
        .with_attr("data-island-props", props)
        .with_child(plus.clone());
    (root, plus)
}

// --- Configuration ---

#[test]
fn config_defaults_from_empty_json() {
    let config = IslandsConfig::from_json("{}").unwrap();
    assert_eq!(config, IslandsConfig::default());
    assert_eq!(config.duplicate_policy, DuplicatePolicy::Replace);
    assert_eq!(config.timings, WidgetTimings::default());
}

#[test]
fn config_reads_policy_and_timings() {
    let config = IslandsConfig::from_json(
        r#"{"duplicate_policy": "reject", "timings": {"draft_debounce_ms": 50}}"#,
    )
    .unwrap();
    assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
    assert_eq!(config.timings.draft_debounce_ms, 50);
    assert_eq!(config.timings.action_delay_ms, 450);
}

#[test]
fn config_rejects_malformed_json() {
    let err = IslandsConfig::from_json("{duplicate_policy").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().starts_with("invalid islands config"));
}

// --- Bootstrap ---

#[test]
fn bootstrap_registers_the_stock_widgets() {
    let islands = islands(&IslandsConfig::new());
    assert_eq!(islands.registry().len(), 8);
    assert!(islands.registry().contains("counter-widget"));
    assert!(islands.registry().contains("error_boundary"));
}

#[test]
fn reject_policy_refuses_overriding_a_stock_widget() {
    let islands = islands(&IslandsConfig::new().with_duplicate_policy(DuplicatePolicy::Reject));
    let err = islands
        .register("counter-widget", Arc::new(EchoAdapter::new()))
        .unwrap_err();
    assert!(matches!(err, RegistryError::Duplicate { .. }));
}

// --- Mounting ---

#[test]
fn mount_unknown_primitive_fails() {
    let islands = islands(&IslandsConfig::new());
    let payload = MountPayload::new(Element::new("div"), "carousel");
    let err = islands.mount(payload, None).unwrap_err();
    assert!(matches!(err, MountError::UnknownPrimitive(ref name) if name == "carousel"));
    assert!(islands.ledger().is_empty());
}

#[test]
fn mount_marked_requires_the_marker() {
    let islands = islands(&IslandsConfig::new());
    let err = islands.mount_marked(&Element::new("div"), None).unwrap_err();
    assert!(matches!(err, MountError::MissingMarker(_)));
}

#[test]
fn markers_become_the_payload() {
    let element = Element::new("div")
        .with_attr(ISLAND_ATTR, "wizard_state")
        .with_attr("data-island-id", "w1")
        .with_attr("data-island-version", "2")
        .with_attr("data-island-props", r#"{"stateKey": "signup"}"#);
    let payload = payload_from_markers(&element).unwrap();
    assert_eq!(payload.name(), "wizard_state");
    assert_eq!(payload.id(), Some("w1"));
    assert_eq!(payload.version(), Some("2"));
    assert_eq!(read_props(&payload)["stateKey"], "signup");
}

#[test]
fn unreadable_props_marker_means_no_props() {
    let element = Element::new("div")
        .with_attr(ISLAND_ATTR, "counter-widget")
        .with_attr("data-island-props", "{seed: 3");
    let payload = payload_from_markers(&element).unwrap();
    assert!(payload.raw_props().is_none());
    assert!(read_props(&payload).is_empty());
}

#[test]
fn mount_all_mounts_every_marked_descendant() {
    let islands = islands(&IslandsConfig::new());
    let host = RecordingHost::new();
    let (first, _) = counter_island(r#"{"seed": 1}"#);
    let (second, _) = counter_island("not json");
    let unknown = Element::new("div").with_attr(ISLAND_ATTR, "carousel");
    let body = islands.window().document().body().clone();
    body.append_child(&first);
    body.append_child(&unknown);
    body.append_child(&second);

    assert_eq!(islands.mount_document(Some(host.api())), 2);
    assert_eq!(host.states(), vec![json!({"count": 1}), json!({"count": 0})]);
    assert_eq!(islands.ledger().len(), 2);
}

// --- Unmounting ---

#[test]
fn unmount_runs_cleanup_once() {
    let islands = islands(&IslandsConfig::new());
    let echo = EchoAdapter::new();
    islands.register("echo", Arc::new(echo.clone())).unwrap();
    let element = Element::new("div");

    islands.mount(MountPayload::new(element.clone(), "echo"), None).unwrap();
    assert!(islands.unmount(&element));
    assert!(!islands.unmount(&element));
    assert_eq!(echo.mounts(), 1);
    assert_eq!(echo.cleanups(), 1);
}

#[test]
fn remount_cleans_up_the_previous_mount_first() {
    let islands = islands(&IslandsConfig::new());
    let echo = EchoAdapter::new();
    islands.register("echo", Arc::new(echo.clone())).unwrap();
    let element = Element::new("div");

    islands.mount(MountPayload::new(element.clone(), "echo"), None).unwrap();
    islands.mount(MountPayload::new(element.clone(), "echo"), None).unwrap();

    assert_eq!(echo.mounts(), 2);
    assert_eq!(echo.cleanups(), 1);
    assert_eq!(islands.ledger().len(), 1);
}

#[test]
fn unmounted_counter_ignores_clicks() {
    let islands = islands(&IslandsConfig::new());
    let host = RecordingHost::new();
    let (root, plus) = counter_island("{}");

    islands.mount_marked(&root, Some(host.api())).unwrap();
    plus.click();
    islands.unmount(&root);
    plus.click();

    assert_eq!(host.states(), vec![json!({"count": 0}), json!({"count": 1})]);
}

#[test]
fn prune_forgets_dropped_elements() {
    let islands = islands(&IslandsConfig::new());
    let echo = EchoAdapter::new();
    islands.register("echo", Arc::new(echo.clone())).unwrap();

    islands.mount(MountPayload::new(Element::new("div"), "echo"), None).unwrap();
    assert_eq!(islands.prune_detached(), 1);
    assert!(islands.ledger().is_empty());
    assert_eq!(echo.cleanups(), 0);
}

#[test]
fn prune_reclaims_dropped_stock_widgets() {
    let islands = islands(&IslandsConfig::new());
    let widgets = [
        ("counter-widget", vec!["data-counter-value", "data-counter-plus", "data-counter-minus"]),
        ("error_boundary", vec!["data-error-body", "data-error-fallback", "data-error-reset"]),
        ("grid_state", vec!["data-grid-filter", "data-grid-sort", "data-grid-body"]),
        ("draft_store", vec!["data-draft-saved-at"]),
        ("state_sync", vec![]),
        ("wizard_state", vec!["data-wizard-next", "data-wizard-prev", "data-wizard-status"]),
        ("upload_state", vec!["data-upload-start", "data-upload-status"]),
        ("action_queue", vec!["data-action-trigger", "data-action-status"]),
    ];

    for (name, markers) in widgets {
        {
            let root = Element::new("div").with_attr(ISLAND_ATTR, name);
            for marker in markers {
                root.append_child(&Element::new("button").with_attr(marker, ""));
            }
            root.append_child(&Element::new("input").with_attr("data-draft-field", "title"));
            root.append_child(&Element::new("input").with_attr("data-state-field", ""));
            islands.mount_marked(&root, None).unwrap();
            assert_eq!(islands.prune_detached(), 0, "{name} pruned while alive");
        }
        assert_eq!(islands.prune_detached(), 1, "{name} kept its element alive");
    }
    assert!(islands.ledger().is_empty());
}

#[test]
fn emissions_outlive_the_root_handle() {
    let islands = islands(&IslandsConfig::new());
    let host = RecordingHost::new();
    let plus = {
        let (root, plus) = counter_island(r#"{"seed": 1}"#);
        islands.mount_marked(&root, Some(host.api())).unwrap();
        plus
    };

    plus.click();

    assert_eq!(host.states(), vec![json!({"count": 1}), json!({"count": 2})]);
    assert_eq!(islands.prune_detached(), 1);
}

#[test]
fn init_tracing_is_idempotent() {
    chirp::init_tracing();
    assert!(!chirp::init_tracing());
}
