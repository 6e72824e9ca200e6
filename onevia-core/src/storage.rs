//! In-memory [`ClientStorage`] used by hosts without a browser and by tests.
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use thiserror::Error;

use crate::ClientStorage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("write to `{key}` rejected")]
    WriteRejected { key: String },
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
    reject_writes: Cell<bool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with `key = value`.
    #[must_use]
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent write fail, like a full or disabled store.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    #[must_use]
    pub fn item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl ClientStorage for MemoryStorage {
    type Error = StorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.item(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.reject_writes.get() {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
            });
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_rejects() {
        let storage = MemoryStorage::new().with_item("a", "1");
        assert_eq!(storage.get("a"), Ok(Some("1".to_string())));
        storage.set("b", "2").unwrap();
        storage.reject_writes(true);
        assert_eq!(
            storage.set("b", "3"),
            Err(StorageError::WriteRejected { key: "b".into() })
        );
        assert_eq!(storage.item("b").as_deref(), Some("2"));
    }
}
