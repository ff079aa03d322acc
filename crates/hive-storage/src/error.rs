//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using durable storage.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing store.
    #[error("failed to open store: {0}")]
    Open(String),

    /// Failed to read from the backing store.
    #[error("read failed: {0}")]
    Read(String),

    /// Failed to write to the backing store.
    #[error("write failed: {0}")]
    Write(String),

    /// Failed to serialize a value.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Failed to deserialize a stored value.
    #[error("deserialization error: {0}")]
    Deserialize(String),
}