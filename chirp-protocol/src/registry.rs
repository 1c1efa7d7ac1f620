//! The registry interface islands register into.

use crate::adapter::Adapter;
use crate::error::RegistryError;
use std::sync::Arc;

/// Name → adapter table installed by the host before any island registers.
///
/// What happens when a name is registered twice is the implementation's
/// policy (replace or reject); callers only rely on `get` returning the
/// adapter the registry accepted last.
pub trait IslandRegistry: Send + Sync {
    /// Store `adapter` under `name`.
    fn register(&self, name: &str, adapter: Arc<dyn Adapter>) -> Result<(), RegistryError>;

    /// The adapter registered under `name`.
    fn get(&self, name: &str) -> Option<Arc<dyn Adapter>>;

    /// Registered names, sorted.
    fn names(&self) -> Vec<String>;
}
