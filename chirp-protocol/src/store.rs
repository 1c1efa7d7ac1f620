//! The page's key-value store.

use crate::error::StoreError;

/// A string key-value store with last-writer-wins semantics.
///
/// Keys are namespaced by convention (`chirp:draft:<key>`). Values are
/// opaque strings; callers serialize. Concurrent writers to the same key
/// overwrite each other without merging.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Create or overwrite a value.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete a value. No-op if the key doesn't exist.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Keys starting with `prefix`, sorted.
    fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
