//! Durable key-value storage for the Hive storefront.
//!
//! Models the origin-scoped persistent store the client runs against:
//! string keys, string values, surviving restarts. Two backends are
//! provided:
//!
//! - [`MemoryStorage`]: process-local, for tests and ephemeral sessions.
//! - [`FileStorage`]: a single JSON file on disk, re-read on every
//!   access so that writes made by another process are visible on the
//!   next call.
//!
//! Typed access goes through [`StorageExt::get_json`] /
//! [`StorageExt::set_json`], which layer serde_json over the string
//! cells.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::{de::DeserializeOwned, Serialize};

/// String-keyed durable storage.
///
/// Implementations must reflect the current durable state on every
/// call rather than caching reads; callers rely on this to observe
/// out-of-band changes (another open view of the same store).
pub trait Storage: Send + Sync {
    /// Get the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// JSON convenience layer over [`Storage`].
pub trait StorageExt: Storage {
    /// Get and deserialize the value under `key`.
    ///
    /// Returns `None` if the key is absent. A present but malformed
    /// value is a [`StorageError::Deserialize`]; callers that treat
    /// corrupt state as missing state handle that at their level.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get(key)? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .map_err(|e| StorageError::Deserialize(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serialize and store `value` under `key`.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.set(key, &raw)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}
