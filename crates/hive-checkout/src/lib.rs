//! Checkout coordination for the Hive storefront.
//!
//! Orchestrates the transition from "cart" to "submitted order":
//! gates on authentication, resolves the shipping address, builds the
//! outbound order from click-time cart contents, submits it over the
//! [`api::CommerceApi`] client, and clears the cart only on confirmed
//! success. Every failure leaves the cart intact; the worst outcome
//! is "checkout did not complete", which is always recoverable by
//! retry.

pub mod address;
pub mod api;
pub mod coordinator;
pub mod error;
pub mod order;

pub use address::Address;
pub use api::{ApiError, CommerceApi};
pub use coordinator::{AddressChoice, CheckoutCoordinator, CheckoutOutcome, CheckoutState};
pub use error::CheckoutError;
pub use order::{OrderItem, OrderRequest, PaymentMethod};
