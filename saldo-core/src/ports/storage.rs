//! Durable key/value storage port

use crate::domain::result::Result;

/// String-valued key/value storage that survives restarts
///
/// Values are opaque strings (JSON documents in practice); typed access
/// lives in `services::JsonStorage`.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
