//! Key-value persistence with corruption tolerance
//!
//! Features:
//! - `Store` trait over a string key-value backend (LocalStorage on web)
//! - Namespaced JSON records (`timon_<name>`)
//! - Malformed records read back as absent (logged, never propagated)

pub mod memory;

pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PersistenceError;

/// Namespace prefix for every record the game writes
pub const NAMESPACE: &str = "timon";

/// A raw string key-value store.
///
/// Backends are handles onto one shared store, so every method takes `&self`.
pub trait Store {
    /// Read the raw value for `key`, `None` if absent
    fn read(&self, key: &str) -> Option<String>;

    /// Overwrite the value for `key`
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Remove `key` (no-op if absent)
    fn remove(&self, key: &str);
}

/// Typed JSON records on top of a [`Store`], one independent key per record.
#[derive(Debug, Clone)]
pub struct Records<S> {
    store: S,
    namespace: &'static str,
}

impl<S: Store> Records<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            namespace: NAMESPACE,
        }
    }

    /// Full storage key for a record name
    pub fn key(&self, name: &str) -> String {
        format!("{}_{}", self.namespace, name)
    }

    /// Load a record. Absent and unparsable records both yield `None`.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let key = self.key(name);
        let raw = self.store.read(&key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(source) => {
                log::warn!("{}", PersistenceError::Parse { key, source });
                None
            }
        }
    }

    /// Serialize and overwrite a record
    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(value)?;
        self.store.write(&self.key(name), &json)
    }

    /// Delete a record
    pub fn remove(&self, name: &str) {
        self.store.remove(&self.key(name));
    }
}
