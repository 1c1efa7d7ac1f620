use chirp_dom::Window;
use chirp_protocol::{
    Adapter, HostApi, IslandRegistry, KeyValueStore, MountContext, MountPayload, RegistryError,
};
use std::sync::Arc;

/// The host environment islands run in: the page, its key-value store, and
/// the registry installed for this page, if any.
///
/// Passed explicitly to every module that registers, in place of ambient
/// global state.
#[derive(Clone)]
pub struct HostEnv {
    window: Window,
    store: Arc<dyn KeyValueStore>,
    registry: Option<Arc<dyn IslandRegistry>>,
}

impl HostEnv {
    /// An environment with no registry installed yet.
    pub fn new(window: Window, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            window,
            store,
            registry: None,
        }
    }

    /// Install the registry islands register into.
    pub fn with_registry(mut self, registry: Arc<dyn IslandRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The page.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The page's key-value store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// The installed registry, if any.
    pub fn registry(&self) -> Option<&Arc<dyn IslandRegistry>> {
        self.registry.as_ref()
    }

    /// The context handed to an adapter mounting `payload`.
    pub fn mount_context(&self, payload: MountPayload, api: Option<HostApi>) -> MountContext {
        MountContext::new(payload, self.window.clone(), Arc::clone(&self.store)).with_api(api)
    }
}

/// Register `adapter` under `name` in the environment's registry.
///
/// Fails with [`RegistryError::Missing`] naming the primitive when the host
/// never installed a registry. That is a startup misconfiguration: callers
/// propagate it, nobody retries it.
pub fn register_primitive(
    env: &HostEnv,
    name: &str,
    adapter: Arc<dyn Adapter>,
) -> Result<(), RegistryError> {
    let Some(registry) = env.registry() else {
        tracing::warn!(primitive = name, "chirp.registry.missing");
        return Err(RegistryError::Missing {
            primitive: name.to_owned(),
        });
    };
    registry.register(name, adapter)
}
