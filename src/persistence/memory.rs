//! In-memory store
//!
//! Backs native builds and tests. Clones share the same map, the way every
//! `window.localStorage` handle sees the same storage.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::Store;
use crate::error::PersistenceError;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (simulates a full quota)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.fail_writes.get() {
            return Err(PersistenceError::Write {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.write("k", "v").unwrap();
        assert_eq!(b.read("k").as_deref(), Some("v"));
        b.remove("k");
        assert!(a.is_empty());
    }

    #[test]
    fn test_failed_write_leaves_previous_value() {
        let store = MemoryStore::new();
        store.write("k", "old").unwrap();
        store.set_fail_writes(true);
        assert!(store.write("k", "new").is_err());
        assert_eq!(store.read("k").as_deref(), Some("old"));
    }
}
