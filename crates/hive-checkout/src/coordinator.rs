//! Checkout coordination state machine.

use crate::address::Address;
use crate::api::{ApiError, CommerceApi};
use crate::error::CheckoutError;
use crate::order::{OrderRequest, PaymentMethod};
use hive_auth::AuthGate;
use hive_commerce::cart::CartStore;
use hive_commerce::ids::AddressId;
use hive_commerce::pricing::compute_breakdown;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Where a checkout attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutState {
    /// No submission in flight.
    Idle,
    /// Checkout was invoked without a session; the caller should
    /// redirect to login (the coordinator only signals the need).
    BlockedUnauthenticated,
    /// Checkout was invoked on an empty cart; nothing was submitted.
    BlockedEmpty,
    /// Exactly one order submission is in flight.
    Submitting,
    /// The backend acknowledged the order; the cart was cleared.
    Succeeded,
    /// Submission failed; the cart is untouched and retry is safe.
    Failed,
}

/// The caller's address selection for this attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressChoice {
    /// Use a saved address by id.
    Saved(AddressId),
    /// Use an inline-entered address.
    Inline(Address),
}

/// What a [`CheckoutCoordinator::place_order`] call amounted to.
///
/// All of these are recoverable, user-facing results rather than
/// errors; see [`CheckoutError`] for the invalid-input paths.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// No session; redirect the user to login and retry after.
    RedirectToLogin,
    /// The cart was empty; nothing was submitted.
    EmptyCart,
    /// Another submission is already in flight; this call was a
    /// no-op.
    AlreadySubmitting,
    /// The order was acknowledged and the cart cleared.
    Placed,
    /// The backend rejected the order or the request never
    /// completed; the cart is intact, retry is safe.
    Failed(ApiError),
}

/// Orchestrates the transition from "cart" to "submitted order".
///
/// Reads the cart store and auth gate, submits over the API client,
/// and clears the cart as the single side effect of a confirmed
/// success. At most one submission is in flight at a time; a second
/// invocation while submitting reports
/// [`CheckoutOutcome::AlreadySubmitting`] without touching anything.
pub struct CheckoutCoordinator {
    cart: Arc<CartStore>,
    auth: Arc<AuthGate>,
    api: Arc<dyn CommerceApi>,
    state: Mutex<CheckoutState>,
}

impl CheckoutCoordinator {
    /// Create a coordinator over the given collaborators.
    pub fn new(cart: Arc<CartStore>, auth: Arc<AuthGate>, api: Arc<dyn CommerceApi>) -> Self {
        Self {
            cart,
            auth,
            api,
            state: Mutex::new(CheckoutState::Idle),
        }
    }

    /// Where the current/most recent attempt stands.
    pub fn state(&self) -> CheckoutState {
        *self.lock_state()
    }

    /// Fetch the user's saved addresses.
    ///
    /// Degrades gracefully: no session or a fetch failure yields an
    /// empty list, forcing inline entry rather than failing checkout.
    pub async fn saved_addresses(&self) -> Vec<Address> {
        let Some(token) = self.auth.token() else {
            return Vec::new();
        };
        match self.api.fetch_addresses(&token).await {
            Ok(addresses) => addresses,
            Err(e) => {
                warn!(error = %e, "address fetch failed, falling back to inline entry");
                Vec::new()
            }
        }
    }

    /// The default selection for a fetched address list: the first
    /// saved entry, if any.
    pub fn default_selection(addresses: &[Address]) -> Option<AddressId> {
        addresses.first().and_then(|a| a.id.clone())
    }

    /// Submit the order.
    ///
    /// Line items are built from the cart as it stands at this call,
    /// not from any snapshot taken earlier in the session. On
    /// confirmed success the cart is cleared (which publishes one
    /// cart-changed notification); on any failure the cart is left
    /// byte-for-byte intact.
    pub async fn place_order(
        &self,
        choice: AddressChoice,
        payment_method: PaymentMethod,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if *self.lock_state() == CheckoutState::Submitting {
            return Ok(CheckoutOutcome::AlreadySubmitting);
        }

        let Some(token) = self.auth.token() else {
            self.set_state(CheckoutState::BlockedUnauthenticated);
            debug!("checkout blocked: no session");
            return Ok(CheckoutOutcome::RedirectToLogin);
        };

        if self.cart.load().is_empty() {
            self.set_state(CheckoutState::BlockedEmpty);
            debug!("checkout blocked: empty cart");
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let address = match self.resolve_address(&token, choice).await {
            Ok(address) => address,
            Err(e) => {
                self.set_state(CheckoutState::Idle);
                return Err(e);
            }
        };

        // Single-submission guard; the address fetch above may have
        // suspended, so re-check before claiming the slot.
        {
            let mut state = self.lock_state();
            if *state == CheckoutState::Submitting {
                return Ok(CheckoutOutcome::AlreadySubmitting);
            }
            *state = CheckoutState::Submitting;
        }

        // Click-time contents: re-read now that we are committed.
        let cart = self.cart.load();
        if cart.is_empty() {
            self.set_state(CheckoutState::BlockedEmpty);
            return Ok(CheckoutOutcome::EmptyCart);
        }
        let pricing = match compute_breakdown(&cart) {
            Ok(pricing) => pricing,
            Err(e) => {
                self.set_state(CheckoutState::Idle);
                return Err(e.into());
            }
        };
        let order = OrderRequest::build(&cart, address, &pricing, payment_method);

        debug!(
            items = order.items.len(),
            total = %pricing.total,
            method = payment_method.as_str(),
            "submitting order"
        );

        match self.api.submit_order(&token, &order).await {
            Ok(()) => {
                self.set_state(CheckoutState::Succeeded);
                self.cart.clear()?;
                debug!("order acknowledged, cart cleared");
                Ok(CheckoutOutcome::Placed)
            }
            Err(e) => {
                self.set_state(CheckoutState::Failed);
                warn!(error = %e, "order submission failed, cart preserved");
                Ok(CheckoutOutcome::Failed(e))
            }
        }
    }

    async fn resolve_address(
        &self,
        token: &str,
        choice: AddressChoice,
    ) -> Result<Address, CheckoutError> {
        match choice {
            AddressChoice::Saved(id) => {
                let saved = match self.api.fetch_addresses(token).await {
                    Ok(addresses) => addresses,
                    Err(e) => {
                        warn!(error = %e, "address fetch failed during submission");
                        Vec::new()
                    }
                };
                saved
                    .into_iter()
                    .find(|a| a.id.as_ref() == Some(&id))
                    .ok_or(CheckoutError::AddressNotFound(id))
            }
            AddressChoice::Inline(address) => {
                if !address.is_complete() {
                    return Err(CheckoutError::IncompleteAddress);
                }
                Ok(address)
            }
        }
    }

    fn set_state(&self, state: CheckoutState) {
        *self.lock_state() = state;
    }

    fn lock_state(&self) -> MutexGuard<'_, CheckoutState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for CheckoutCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutCoordinator")
            .field("state", &self.state())
            .finish()
    }
}
