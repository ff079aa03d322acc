//! Backend API client contract.
//!
//! The exact transport is out of scope; implementations adapt this
//! trait to whatever HTTP stack the host application uses. The
//! coordinator only depends on the contract.

use crate::address::Address;
use crate::order::OrderRequest;
use async_trait::async_trait;
use hive_commerce::catalog::Product;
use thiserror::Error;

/// Errors from the backend API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The presented token was missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The backend rejected the request.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The request never completed (network failure, timeout).
    #[error("transport error: {0}")]
    Transport(String),
}

/// The consumed slice of the commerce backend.
#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// `GET /products` — full catalog listing.
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError>;

    /// `GET /products/featured` — home-page featured products.
    async fn fetch_featured(&self) -> Result<Vec<Product>, ApiError>;

    /// `GET /addresses` — the user's saved addresses.
    async fn fetch_addresses(&self, token: &str) -> Result<Vec<Address>, ApiError>;

    /// `POST /orders` — submit an order.
    ///
    /// Only the success/failure signal matters to the caller: success
    /// means the coordinator may clear the cart, failure means the
    /// cart stays untouched.
    async fn submit_order(&self, token: &str, order: &OrderRequest) -> Result<(), ApiError>;
}
