//! In-memory storage backend.

use crate::{Storage, StorageError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local storage backed by a `HashMap`.
///
/// Used by tests and by ephemeral sessions that have nowhere durable
/// to write. Shared freely behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    cells: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let cells = self
            .cells
            .lock()
            .map_err(|e| StorageError::Read(e.to_string()))?;
        Ok(cells.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut cells = self
            .cells
            .lock()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        cells.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut cells = self
            .cells
            .lock()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        cells.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("token").unwrap(), None);

        storage.set("token", "abc123").unwrap();
        assert_eq!(storage.get("token").unwrap(), Some("abc123".to_string()));

        storage.remove("token").unwrap();
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let storage = MemoryStorage::new();
        storage.set("cart", "[]").unwrap();
        storage.set("cart", "[1]").unwrap();
        assert_eq!(storage.get("cart").unwrap(), Some("[1]".to_string()));
    }

    #[test]
    fn test_remove_absent_key_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove("never-set").is_ok());
    }
}
