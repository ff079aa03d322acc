//! Session-token auth gate for the Hive storefront.
//!
//! Session state is nothing more than the presence of bearer tokens
//! in durable storage; there is no in-memory session object. The
//! [`AuthGate`] is the single capability consulted wherever session
//! state matters, instead of each surface inspecting storage on its
//! own.

mod error;
mod gate;

pub use error::AuthError;
pub use gate::{AuthGate, ADMIN_TOKEN_KEY, TOKEN_KEY};
