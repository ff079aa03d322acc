//! Commerce domain types and the cart state engine for the Hive
//! storefront.
//!
//! The centerpiece is the [`cart::CartStore`]: the single owner of
//! the persisted shopping cart. Independently rendered surfaces
//! (header badge, bottom navigation, product grid, cart page) share
//! no in-memory state; each holds a handle to the store, mutates
//! through it, and learns about changes over the [`bus::ChangeBus`].
//! Every mutation persists first and notifies second, so a listener
//! that re-reads after a notification always observes the new state.
//!
//! Pricing is a pure derivation in [`pricing`]; nothing derived is
//! ever persisted.

pub mod bus;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod money;
pub mod pricing;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::bus::{ChangeBus, Subscription};
    pub use crate::cart::{Cart, CartLine, CartStore, CART_KEY};
    pub use crate::catalog::Product;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::pricing::{compute_breakdown, PricingBreakdown};
}
