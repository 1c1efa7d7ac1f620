//! Host-side mount driver.
//!
//! Islands are declared in markup:
//!
//! | Attribute | Meaning |
//! |-----------|---------|
//! | `data-island` | Primitive name (required) |
//! | `data-island-id` | Instance id |
//! | `data-island-version` | Declared version |
//! | `data-island-props` | Props as JSON; unreadable JSON means no props |

use crate::config::IslandsConfig;
use chirp_dom::{Element, Window};
use chirp_foundation::{CleanupLedger, HostEnv, register_primitive};
use chirp_protocol::{
    Adapter, HostApi, IslandRegistry, KeyValueStore, MountError, MountPayload, RegistryError,
};
use chirp_registry::PrimitiveRegistry;
use std::sync::Arc;

/// Marker naming an element's primitive.
pub const ISLAND_ATTR: &str = "data-island";
/// Marker carrying the instance id.
pub const ISLAND_ID_ATTR: &str = "data-island-id";
/// Marker carrying the declared version.
pub const ISLAND_VERSION_ATTR: &str = "data-island-version";
/// Marker carrying JSON props.
pub const ISLAND_PROPS_ATTR: &str = "data-island-props";

/// A page's island runtime: the registry, the host environment and the
/// cleanup ledger, wired together.
#[derive(Clone)]
pub struct Islands {
    env: HostEnv,
    registry: Arc<PrimitiveRegistry>,
    ledger: CleanupLedger,
}

impl Islands {
    /// Install a registry on a fresh environment for `window` and, with the
    /// `widgets` feature, register the stock widgets.
    pub fn bootstrap(
        window: Window,
        store: Arc<dyn KeyValueStore>,
        config: &IslandsConfig,
    ) -> Result<Self, RegistryError> {
        let registry = Arc::new(PrimitiveRegistry::with_policy(config.duplicate_policy));
        let env = HostEnv::new(window, store).with_registry(registry.clone());
        #[cfg(feature = "widgets")]
        chirp_widgets::register_all(&env, config.timings)?;
        tracing::info!(primitives = registry.len(), "chirp.islands.bootstrap");
        Ok(Self {
            env,
            registry,
            ledger: CleanupLedger::new(),
        })
    }

    /// The host environment adapters are mounted in.
    pub fn env(&self) -> &HostEnv {
        &self.env
    }

    /// The installed registry.
    pub fn registry(&self) -> &Arc<PrimitiveRegistry> {
        &self.registry
    }

    /// Pending cleanups.
    pub fn ledger(&self) -> &CleanupLedger {
        &self.ledger
    }

    /// The page.
    pub fn window(&self) -> &Window {
        self.env.window()
    }

    /// Register an extra primitive.
    pub fn register(&self, name: &str, adapter: Arc<dyn Adapter>) -> Result<(), RegistryError> {
        register_primitive(&self.env, name, adapter)
    }

    /// Mount the adapter registered under `payload.name()` onto the
    /// payload's element and record its cleanup.
    ///
    /// An element that is already mounted is unmounted first.
    pub fn mount(&self, payload: MountPayload, api: Option<HostApi>) -> Result<(), MountError> {
        let adapter = self
            .registry
            .get(payload.name())
            .ok_or_else(|| MountError::UnknownPrimitive(payload.name().to_owned()))?;
        if self.ledger.run_cleanup(&payload) {
            tracing::debug!(element = %payload.element_id(), "chirp.islands.remount");
        }
        tracing::debug!(
            island = payload.name(),
            element = %payload.element_id(),
            host_api = api.is_some(),
            "chirp.islands.mount"
        );
        let cleanup = adapter.mount(self.env.mount_context(payload.clone(), api));
        self.ledger.attach_cleanup(&payload, cleanup);
        Ok(())
    }

    /// Mount an element declared with island markers.
    pub fn mount_marked(&self, element: &Element, api: Option<HostApi>) -> Result<(), MountError> {
        let payload = payload_from_markers(element)?;
        self.mount(payload, api)
    }

    /// Mount every island declared under `root`, in document order.
    ///
    /// Failures are logged and skipped. Returns how many mounted.
    pub fn mount_all(&self, root: &Element, api: Option<HostApi>) -> usize {
        let mut mounted = 0;
        for element in root.query_selector_all(ISLAND_ATTR) {
            match self.mount_marked(&element, api.clone()) {
                Ok(()) => mounted += 1,
                Err(err) => tracing::warn!(
                    element = %element.id(),
                    error = %err,
                    "chirp.islands.mount_failed"
                ),
            }
        }
        mounted
    }

    /// Mount every island in the page body.
    pub fn mount_document(&self, api: Option<HostApi>) -> usize {
        let body = self.window().document().body().clone();
        self.mount_all(&body, api)
    }

    /// Run the element's cleanup. Returns `false` when nothing was mounted
    /// there, including on a second unmount.
    pub fn unmount(&self, element: &Element) -> bool {
        self.ledger.run_for(element.id())
    }

    /// Forget cleanups for elements that were dropped without an unmount.
    pub fn prune_detached(&self) -> usize {
        self.ledger.prune_detached()
    }
}

/// Build a payload from an element's island markers.
pub fn payload_from_markers(element: &Element) -> Result<MountPayload, MountError> {
    let name = element
        .attribute(ISLAND_ATTR)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| MountError::MissingMarker(element.id().to_string()))?;
    let mut payload = MountPayload::new(element.clone(), name);
    if let Some(id) = element.attribute(ISLAND_ID_ATTR) {
        payload = payload.with_id(id);
    }
    if let Some(version) = element.attribute(ISLAND_VERSION_ATTR) {
        payload = payload.with_version(version);
    }
    if let Some(raw) = element.attribute(ISLAND_PROPS_ATTR) {
        match serde_json::from_str(&raw) {
            Ok(props) => payload = payload.with_props(props),
            Err(err) => {
                tracing::warn!(element = %element.id(), error = %err, "chirp.islands.bad_props");
            }
        }
    }
    Ok(payload)
}
