#![deny(missing_docs)]
//! In-memory implementation of chirp-protocol's KeyValueStore trait.
//!
//! Uses a `HashMap` behind a `RwLock`. This is the page-local store islands
//! persist into (drafts live under `chirp:draft:<key>`); it does not
//! survive the process.

use chirp_protocol::{KeyValueStore, StoreError};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory key-value store backed by a `HashMap` behind a `RwLock`.
///
/// Writers to the same key overwrite each other: last writer wins.
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-seeded with entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: RwLock::new(data),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        tracing::trace!(key, bytes = value.len(), "chirp.store.set");
        self.data.write().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.data.write().remove(key);
        Ok(())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let data = self.data.read();
        let mut keys: Vec<String> = data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}
