//! Typed JSON access to a key/value store

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::result::Result;
use crate::ports::KeyValueStore;

/// Reads and writes JSON-encoded values by key
///
/// Loading never fails: unreadable or unparseable values are logged and
/// reported as absent.
#[derive(Clone)]
pub struct JsonStorage {
    store: Arc<dyn KeyValueStore>,
}

impl JsonStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, "failed to read stored value: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, "failed to parse stored value: {}", e);
                None
            }
        }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.store.remove(key)
    }
}
