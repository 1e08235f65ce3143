//! In-process credential backend

use std::collections::HashMap;
use std::sync::RwLock;

use super::{CredentialStorage, StorageError};

/// Map-backed storage, used natively and as a test double for the browser
/// backends
pub struct MemoryStorage {
    label: &'static str,
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl CredentialStorage for MemoryStorage {
    fn label(&self) -> &'static str {
        self.label
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::new(self.label, "lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::new(self.label, "lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::new(self.label, "lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}
