//! The cart store: single owner of the persisted cart.

use crate::bus::{ChangeBus, Subscription};
use crate::cart::Cart;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use hive_storage::{Storage, StorageExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Durable, single-writer representation of the cart.
///
/// The store is the only component permitted to read or write the
/// persisted cart blob; every other surface goes through it. Each
/// mutating operation performs exactly one persist followed by
/// exactly one broadcast, in that order, so a listener that re-reads
/// after a notification observes the new state.
///
/// Handles are cheap to share: clone the `Arc` the store lives in
/// and hand one to each surface.
pub struct CartStore {
    storage: Arc<dyn Storage>,
    bus: ChangeBus,
}

impl CartStore {
    /// Create a store over the given durable storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            bus: ChangeBus::new(),
        }
    }

    /// Subscribe to cart-changed notifications.
    ///
    /// Listeners receive no payload; re-read the store.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.bus.subscribe(listener)
    }

    /// The underlying change bus.
    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Load the current cart.
    ///
    /// Absent, malformed, or unreadable persisted state loads as an
    /// empty cart; corrupt state is empty state, never an error
    /// surfaced to callers.
    pub fn load(&self) -> Cart {
        match self.storage.get_json::<Cart>(CART_KEY) {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "failed to load persisted cart, treating as empty");
                Cart::new()
            }
        }
    }

    /// Add one unit of a product.
    ///
    /// An existing line for the same product has its quantity
    /// incremented; otherwise a new line is appended with quantity 1.
    pub fn add_item(&self, product: &Product) -> Result<(), CommerceError> {
        let mut cart = self.load();
        cart.add(product);
        self.persist(&cart)?;
        debug!(product_id = %product.id, count = cart.item_count(), "added item to cart");
        self.bus.publish();
        Ok(())
    }

    /// Set the quantity of a product's line.
    ///
    /// Quantities below 1 are rejected silently: nothing is written
    /// and no notification fires. Reduction to zero goes through
    /// [`CartStore::remove_item`]. An unknown product id persists
    /// the cart unchanged and still notifies.
    pub fn set_quantity(&self, product_id: &ProductId, quantity: i64) -> Result<(), CommerceError> {
        if quantity < 1 {
            return Ok(());
        }
        let mut cart = self.load();
        cart.set_quantity(product_id, quantity);
        self.persist(&cart)?;
        self.bus.publish();
        Ok(())
    }

    /// Remove a product's line.
    ///
    /// Idempotent: removing an absent product persists the cart
    /// unchanged and still notifies.
    pub fn remove_item(&self, product_id: &ProductId) -> Result<(), CommerceError> {
        let mut cart = self.load();
        cart.remove(product_id);
        self.persist(&cart)?;
        self.bus.publish();
        Ok(())
    }

    /// Empty the cart entirely.
    ///
    /// Used on confirmed order success and on logout.
    pub fn clear(&self) -> Result<(), CommerceError> {
        let cart = Cart::new();
        self.persist(&cart)?;
        debug!("cart cleared");
        self.bus.publish();
        Ok(())
    }

    /// Sum of quantities over all lines (the badge figure).
    pub fn item_count(&self) -> i64 {
        self.load().item_count()
    }

    /// Bridge a storage mutation made in another execution context.
    ///
    /// When the host environment reports that `key` changed out from
    /// under this context (another open view wrote the same durable
    /// store), call this to re-emit it as an ordinary cart-changed
    /// notification. Changes to other keys are ignored.
    pub fn external_change(&self, key: &str) {
        if key == CART_KEY {
            debug!("cart changed in another context");
            self.bus.publish();
        }
    }

    fn persist(&self, cart: &Cart) -> Result<(), CommerceError> {
        self.storage.set_json(CART_KEY, cart)?;
        Ok(())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore").field("bus", &self.bus).finish()
    }
}
