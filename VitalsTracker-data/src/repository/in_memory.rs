use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::errors::PersistenceError;
use super::kv::{check_quota, KeyValueStore, DEFAULT_QUOTA_BYTES};

/// In-memory key-value storage
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    /// Stored entries
    entries: Arc<Mutex<HashMap<String, String>>>,
    /// Maximum bytes of keys plus values
    quota: usize,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage with the default quota
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    /// Create a new in-memory storage limited to `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            quota,
        }
    }
}

impl KeyValueStore for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let store = self.entries.lock()?;
        Ok(store.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut store = self.entries.lock()?;

        let other_bytes: usize = store
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        check_quota(other_bytes, key, value, self.quota)?;

        store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("In-memory storage (quota={} bytes)", self.quota)
    }
}
