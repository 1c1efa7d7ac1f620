//! InMemoryStore: HashMap-backed KeyValueStore for testing.

use crate::error::StoreError;
use crate::store::KeyValueStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store backed by a `HashMap` behind a `RwLock`.
#[derive(Default)]
pub struct InMemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let data = self.data.read().map_err(|e| StoreError::Other(e.to_string().into()))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(|e| StoreError::WriteFailed {
            key: key.to_owned(),
            message: e.to_string(),
        })?;
        data.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut data = self.data.write().map_err(|e| StoreError::WriteFailed {
            key: key.to_owned(),
            message: e.to_string(),
        })?;
        data.remove(key);
        Ok(())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let data = self.data.read().map_err(|e| StoreError::Other(e.to_string().into()))?;
        let mut keys: Vec<String> = data
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}
