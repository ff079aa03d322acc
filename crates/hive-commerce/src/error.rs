//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in commerce operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Arithmetic overflow in a money calculation.
    #[error("arithmetic overflow in money calculation")]
    Overflow,

    /// Currency mismatch.
    #[error("currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Durable storage failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<hive_storage::StorageError> for CommerceError {
    fn from(e: hive_storage::StorageError) -> Self {
        CommerceError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
