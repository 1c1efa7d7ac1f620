use chirp_dom::{Element, Window};
use chirp_foundation::{HostEnv, read_props, register_primitive};
use chirp_protocol::test_utils::{EchoAdapter, InMemoryStore};
use chirp_protocol::{
    Adapter, Cleanup, IslandRegistry, MountContext, MountPayload, RegistryError,
};
use chirp_registry::PrimitiveRegistry;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn env() -> HostEnv {
    HostEnv::new(
        Window::new("https://example.test/").unwrap(),
        Arc::new(InMemoryStore::new()),
    )
}

#[test]
fn register_without_registry_fails_naming_the_primitive() {
    let err = register_primitive(&env(), "counter-widget", Arc::new(EchoAdapter::new()))
        .unwrap_err();
    assert!(
        matches!(err, RegistryError::Missing { ref primitive } if primitive == "counter-widget")
    );
    assert!(err.to_string().contains("counter-widget"));
}

#[test]
fn register_puts_the_adapter_in_the_installed_registry() {
    let registry = Arc::new(PrimitiveRegistry::new());
    let env = env().with_registry(registry.clone());
    let adapter: Arc<dyn Adapter> = Arc::new(EchoAdapter::new());

    register_primitive(&env, "counter-widget", Arc::clone(&adapter)).unwrap();

    assert!(Arc::ptr_eq(&registry.get("counter-widget").unwrap(), &adapter));
}

#[test]
fn mount_context_carries_payload_api_and_store() {
    let env = env();
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let adapter = move |ctx: MountContext| -> Option<Cleanup> {
        let props = read_props(&ctx.payload);
        ctx.store.set("k", "v".into()).unwrap();
        *sink.lock().unwrap() = Some((ctx.payload.name().to_owned(), props, ctx.api.is_some()));
        None
    };

    let payload = MountPayload::new(Element::new("div"), "draft_store")
        .with_props(json!({"key": "notes"}));
    let cleanup = adapter.mount(env.mount_context(payload, None));

    assert!(cleanup.is_none());
    let (name, props, has_api) = seen.lock().unwrap().take().unwrap();
    assert_eq!(name, "draft_store");
    assert_eq!(props["key"], "notes");
    assert!(!has_api);
    assert_eq!(env.store().get("k").unwrap().as_deref(), Some("v"));
}
