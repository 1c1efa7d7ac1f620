//! # chirp-protocol: the contract between islands and their host
//!
//! An island is a self-contained interactive widget attached to one element
//! of an otherwise static page. This crate defines everything an island and
//! its host agree on, and nothing about how either side is built.
//!
//! ## The Contract
//!
//! | Piece | Types | What it does |
//! |-------|-------|-------------|
//! | ① Registration | [`Adapter`], [`IslandRegistry`] | Name → adapter, one per name |
//! | ② Mount | [`MountPayload`], [`MountContext`], [`Cleanup`] | What an adapter is handed, what it hands back |
//! | ③ Emission | [`IslandEvent`], [`EventDetail`], [`Emitter`], [`IslandIdentity`] | State snapshots, action outcomes, error signals |
//! | ④ Host override | [`HostApi`] | Optional direct callbacks that replace broadcast per event kind |
//! | ⑤ Persistence | [`KeyValueStore`] | The page's string key-value store |
//!
//! ## Wire Format
//!
//! Broadcast emissions are custom events named `chirp:island:state`,
//! `chirp:island:action`, and `chirp:island:error`. Their detail is a JSON
//! object that always starts from `{name, id, version}` of the island
//! identity. Raw props never cross into a detail.
//!
//! ## Dependency Notes
//!
//! Props, state snapshots, and extra fields are `serde_json` values: they
//! arrive from markup as JSON and leave as JSON event details.

#![deny(missing_docs)]

pub mod adapter;
pub mod emitter;
pub mod error;
pub mod event;
pub mod host;
pub mod payload;
pub mod registry;
pub mod store;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use adapter::{Adapter, Cleanup};
pub use emitter::Emitter;
pub use error::{MountError, RegistryError, StoreError};
pub use event::{
    ACTION_EVENT, ActionStatus, ERROR_EVENT, ERROR_MARKER, EventDetail, EventKind, IslandEvent,
    STATE_EVENT,
};
pub use host::HostApi;
pub use payload::{IslandIdentity, MountContext, MountPayload, Props};
pub use registry::IslandRegistry;
pub use store::KeyValueStore;
