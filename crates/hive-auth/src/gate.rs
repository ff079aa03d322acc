//! The auth gate.

use crate::AuthError;
use hive_commerce::bus::{ChangeBus, Subscription};
use hive_commerce::cart::CartStore;
use hive_storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key holding the user session token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the admin session token.
pub const ADMIN_TOKEN_KEY: &str = "admin_token";

/// Binary session-presence checks over durable storage.
///
/// Every check re-reads storage: tokens can change out-of-band
/// (logout in another open view), and the gate must reflect that on
/// the next call. Nothing is cached.
pub struct AuthGate {
    storage: Arc<dyn Storage>,
    events: ChangeBus,
}

impl AuthGate {
    /// Create a gate over the given durable storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            events: ChangeBus::new(),
        }
    }

    /// Subscribe to auth-changed notifications (login, logout).
    ///
    /// Zero-payload, like cart-changed: subscribers re-derive their
    /// view from the gate.
    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.events.subscribe(listener)
    }

    /// Is a user session present?
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Is an admin session present?
    pub fn is_admin(&self) -> bool {
        self.read_token(ADMIN_TOKEN_KEY).is_some()
    }

    /// The current user session token, if any.
    ///
    /// Protected API calls present this as the bearer credential.
    pub fn token(&self) -> Option<String> {
        self.read_token(TOKEN_KEY)
    }

    /// Store the user session token (login).
    pub fn store_token(&self, token: &str) -> Result<(), AuthError> {
        self.storage.set(TOKEN_KEY, token)?;
        debug!("user session token stored");
        self.events.publish();
        Ok(())
    }

    /// Store the admin session token (admin login).
    pub fn store_admin_token(&self, token: &str) -> Result<(), AuthError> {
        self.storage.set(ADMIN_TOKEN_KEY, token)?;
        debug!("admin session token stored");
        self.events.publish();
        Ok(())
    }

    /// Log out: remove both session tokens and clear the cart, then
    /// publish exactly one auth-changed notification.
    ///
    /// The cart clear publishes its own cart-changed notification as
    /// part of the store's normal mutation contract.
    pub fn logout(&self, cart: &CartStore) -> Result<(), AuthError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(ADMIN_TOKEN_KEY)?;
        cart.clear()?;
        debug!("logged out");
        self.events.publish();
        Ok(())
    }

    fn read_token(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!(key, error = %e, "failed to read session token");
                None
            }
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_commerce::catalog::Product;
    use hive_commerce::ids::ProductId;
    use hive_commerce::money::{Currency, Money};
    use hive_storage::MemoryStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn gate_and_cart() -> (AuthGate, CartStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let gate = AuthGate::new(Arc::clone(&storage) as Arc<dyn Storage>);
        let cart = CartStore::new(Arc::clone(&storage) as Arc<dyn Storage>);
        (gate, cart, storage)
    }

    fn product() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Wildflower Honey".to_string(),
            description: "test".to_string(),
            price: Money::new(34900, Currency::INR),
            image_url: String::new(),
            category: "honey".to_string(),
            is_featured: false,
        }
    }

    #[test]
    fn test_unauthenticated_by_default() {
        let (gate, _, _) = gate_and_cart();
        assert!(!gate.is_authenticated());
        assert!(!gate.is_admin());
        assert!(gate.token().is_none());
    }

    #[test]
    fn test_token_presence_derives_flags() {
        let (gate, _, _) = gate_and_cart();

        gate.store_token("user-tok").unwrap();
        assert!(gate.is_authenticated());
        assert!(!gate.is_admin());

        gate.store_admin_token("admin-tok").unwrap();
        assert!(gate.is_admin());
    }

    #[test]
    fn test_empty_token_is_no_session() {
        let (gate, _, storage) = gate_and_cart();
        storage.set(TOKEN_KEY, "").unwrap();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_out_of_band_change_reflected_on_next_call() {
        let (gate, _, storage) = gate_and_cart();
        gate.store_token("user-tok").unwrap();
        assert!(gate.is_authenticated());

        // Another view removes the token directly from storage.
        storage.remove(TOKEN_KEY).unwrap();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_logout_clears_tokens_and_cart() {
        let (gate, cart, _) = gate_and_cart();
        gate.store_token("user-tok").unwrap();
        gate.store_admin_token("admin-tok").unwrap();
        cart.add_item(&product()).unwrap();

        gate.logout(&cart).unwrap();

        assert!(!gate.is_authenticated());
        assert!(!gate.is_admin());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_logout_publishes_one_auth_notification() {
        let (gate, cart, _) = gate_and_cart();
        gate.store_token("user-tok").unwrap();

        let auth_hits = Arc::new(AtomicUsize::new(0));
        let a = Arc::clone(&auth_hits);
        let _auth_sub = gate.subscribe(move || {
            a.fetch_add(1, Ordering::SeqCst);
        });

        let cart_hits = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&cart_hits);
        let _cart_sub = cart.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        gate.logout(&cart).unwrap();

        assert_eq!(auth_hits.load(Ordering::SeqCst), 1);
        // The cart clear emits its own cart-changed signal.
        assert_eq!(cart_hits.load(Ordering::SeqCst), 1);
    }
}
