#![deny(missing_docs)]
//! Primitive registry for chirp islands.
//!
//! The [`PrimitiveRegistry`] maps primitive names to adapters. The host
//! builds one at bootstrap and installs it before any island module
//! registers. Each name is backed by exactly one adapter; what a second
//! registration under the same name does is decided by the registry's
//! [`DuplicatePolicy`].

use chirp_protocol::{Adapter, IslandRegistry, RegistryError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// What to do when a name is registered a second time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Last write wins.
    #[default]
    Replace,
    /// Keep the first registration and return [`RegistryError::Duplicate`].
    Reject,
}

/// A process-wide name → adapter table.
///
/// Shared behind an `Arc`; registration takes `&self`.
pub struct PrimitiveRegistry {
    adapters: RwLock<HashMap<String, Arc<dyn Adapter>>>,
    policy: DuplicatePolicy,
}

impl PrimitiveRegistry {
    /// Create an empty registry with the default (replace) policy.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Create an empty registry with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            adapters: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// The duplicate policy in force.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Number of registered primitives.
    pub fn len(&self) -> usize {
        self.adapters.read().len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.read().is_empty()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.adapters.read().contains_key(name)
    }
}

impl Default for PrimitiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IslandRegistry for PrimitiveRegistry {
    fn register(&self, name: &str, adapter: Arc<dyn Adapter>) -> Result<(), RegistryError> {
        let mut adapters = self.adapters.write();
        let replaced = adapters.contains_key(name);
        if replaced && self.policy == DuplicatePolicy::Reject {
            tracing::warn!(primitive = name, "chirp.registry.duplicate_rejected");
            return Err(RegistryError::Duplicate {
                primitive: name.to_owned(),
            });
        }
        adapters.insert(name.to_owned(), adapter);
        tracing::debug!(primitive = name, replaced, "chirp.registry.register");
        Ok(())
    }

    fn get(&self, name: &str) -> Option<Arc<dyn Adapter>> {
        self.adapters.read().get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.adapters.read().keys().cloned().collect();
        names.sort();
        names
    }
}
