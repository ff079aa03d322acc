//! Checkout error types.

use hive_commerce::ids::AddressId;
use thiserror::Error;

/// Errors that can occur while preparing or finalizing a checkout.
///
/// Recoverable submission outcomes (blocked on auth, empty cart,
/// backend rejection) are not errors; they are
/// [`crate::CheckoutOutcome`] variants. Errors here mean the caller
/// gave the coordinator something it cannot submit.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// The inline address is missing one or more required fields.
    #[error("address is incomplete")]
    IncompleteAddress,

    /// The selected saved address was not found.
    #[error("saved address not found: {0}")]
    AddressNotFound(AddressId),

    /// Cart or pricing failure.
    #[error(transparent)]
    Commerce(#[from] hive_commerce::CommerceError),
}
