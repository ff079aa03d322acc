//! Shopping cart: contents, persistence, change notification.

mod cart;
mod store;

pub use cart::{Cart, CartLine};
pub use store::{CartStore, CART_KEY};
