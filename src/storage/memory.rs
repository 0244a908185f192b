use std::cell::RefCell;
use std::collections::HashMap;

use super::{StorageError, StorageProvider};

/// In-memory provider for tests and ephemeral runs. Values vanish with the
/// process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a single key, for building test fixtures.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl StorageProvider for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
