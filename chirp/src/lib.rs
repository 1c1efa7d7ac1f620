#![deny(missing_docs)]
//! # chirp: umbrella crate
//!
//! A single import surface for the island runtime. Re-exports the
//! protocol, foundation and implementation crates, plus the host-side
//! [`Islands`] driver and a `prelude` for the happy path.
//!
//! ```no_run
//! use chirp::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let window = Window::new("https://example.test/")?;
//! let islands = Islands::bootstrap(window, Arc::new(MemoryStore::new()), &IslandsConfig::new())?;
//! islands.mount_document(None);
//! # Ok(())
//! # }
//! ```

mod config;
mod islands;
mod telemetry;

pub use chirp_dom as dom;
pub use chirp_foundation as foundation;
pub use chirp_protocol as protocol;
pub use chirp_registry as registry;
#[cfg(feature = "store-memory")]
pub use chirp_store_memory as store_memory;
#[cfg(feature = "widgets")]
pub use chirp_widgets as widgets;

pub use config::{ConfigError, IslandsConfig};
pub use islands::{
    ISLAND_ATTR, ISLAND_ID_ATTR, ISLAND_PROPS_ATTR, ISLAND_VERSION_ATTR, Islands,
    payload_from_markers,
};
pub use telemetry::init_tracing;

/// Happy-path imports for hosting islands.
pub mod prelude {
    pub use chirp_dom::{DomEvent, Element, Window};
    pub use chirp_foundation::{
        CleanupLedger, EventChannel, HostEnv, read_props, register_primitive,
    };
    pub use chirp_protocol::{
        ActionStatus, Adapter, Cleanup, HostApi, IslandRegistry, KeyValueStore, MountContext,
        MountPayload, Props,
    };
    pub use chirp_registry::{DuplicatePolicy, PrimitiveRegistry};

    pub use crate::{Islands, IslandsConfig};

    #[cfg(feature = "store-memory")]
    pub use chirp_store_memory::MemoryStore;

    #[cfg(feature = "widgets")]
    pub use chirp_widgets::{WidgetTimings, register_all};
}
