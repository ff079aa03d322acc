//! Auth error types.

use thiserror::Error;

/// Errors that can occur in auth operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Durable storage failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Clearing the cart during logout failed.
    #[error("cart error during logout: {0}")]
    Cart(String),
}

impl From<hive_storage::StorageError> for AuthError {
    fn from(e: hive_storage::StorageError) -> Self {
        AuthError::Storage(e.to_string())
    }
}

impl From<hive_commerce::CommerceError> for AuthError {
    fn from(e: hive_commerce::CommerceError) -> Self {
        AuthError::Cart(e.to_string())
    }
}
