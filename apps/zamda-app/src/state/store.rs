//! # Session & Cart Store
//!
//! Single source of truth for who is signed in, what is in the cart, which
//! country is selected and how far the sign-in has progressed.
//!
//! ## Change Notification
//! The state lives inside a `tokio::sync::watch` sender. Each operation is one
//! `send_modify` / `send_if_modified` call, so a mutation and its
//! notification happen together: by the time an operation returns, every
//! subscriber sees the new value. Defined no-ops (removing a product that is
//! not in the cart) do not notify.
//!
//! ## Store Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen Action            Store Operation           State Change        │
//! │  ─────────────            ───────────────           ────────────        │
//! │  Type phone digits ──────► set_phone_number() ────► phone_number        │
//! │  Continue to OTP ────────► begin_verification() ──► otp_pending = true  │
//! │  Code accepted (login) ──► set_is_authenticated() ► is_authenticated    │
//! │  Register / Google ──────► sign_in(user) ─────────► user + auth flag    │
//! │  Tap "Add" ──────────────► add_to_cart() ─────────► cart lines          │
//! │  +/- on a cart line ─────► update_cart_quantity() ► cart lines          │
//! │  Pick a country ─────────► set_selected_country() ► selected_country    │
//! │  Log out ────────────────► logout() ──────────────► fresh session       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Weak};

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;
use zamda_core::{default_country, AuthStage, Cart, Country, Product, User};

// =============================================================================
// Errors
// =============================================================================

/// Misuse of the store from outside a live application session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A handle was used after the owning root shut down, or was never
    /// attached to a store at all.
    #[error("Store not initialized: handle used outside an active application session")]
    NotInitialized,
}

// =============================================================================
// State Snapshot
// =============================================================================

/// Everything the store holds. Subscribers receive clones of this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user: Option<User>,
    pub cart: Cart,
    /// Always a member of the static country list.
    pub selected_country: &'static Country,
    /// Local digits captured before verification, no dial code.
    pub phone_number: String,
    pub is_authenticated: bool,
    /// Set once the user has moved on to code entry.
    pub otp_pending: bool,
}

impl AppState {
    /// Sum of quantities over the cart, recomputed on every call.
    pub fn cart_count(&self) -> i64 {
        self.cart.count()
    }

    /// Where the session is in the sign-in progression.
    pub fn auth_stage(&self) -> AuthStage {
        AuthStage::derive(self.is_authenticated, self.otp_pending, &self.phone_number)
    }
}

impl Default for AppState {
    /// A fresh session: nobody signed in, empty cart, first country selected.
    fn default() -> Self {
        AppState {
            user: None,
            cart: Cart::new(),
            selected_country: default_country(),
            phone_number: String::new(),
            is_authenticated: false,
            otp_pending: false,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// The Session & Cart Store.
///
/// None of the operations can fail and none of them validate their input;
/// the screens do that before calling in.
#[derive(Debug)]
pub struct AppStore {
    state: watch::Sender<AppState>,
}

impl AppStore {
    /// Creates a store holding a fresh session.
    pub fn new() -> Self {
        let (state, _) = watch::channel(AppState::default());
        AppStore { state }
    }

    /// Creates a weak handle for injection into a screen.
    pub fn handle(self: &Arc<Self>) -> StoreHandle {
        StoreHandle {
            store: Arc::downgrade(self),
        }
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Runs a closure against the current state without cloning it.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let lines = store.with_state(|s| s.cart.line_count());
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        f(&self.state.borrow())
    }

    /// Clones the whole current state.
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn user(&self) -> Option<User> {
        self.with_state(|s| s.user.clone())
    }

    pub fn cart(&self) -> Cart {
        self.with_state(|s| s.cart.clone())
    }

    /// Total units in the cart. Derived on read, never stored.
    pub fn cart_count(&self) -> i64 {
        self.with_state(AppState::cart_count)
    }

    pub fn selected_country(&self) -> &'static Country {
        self.with_state(|s| s.selected_country)
    }

    pub fn phone_number(&self) -> String {
        self.with_state(|s| s.phone_number.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.with_state(|s| s.is_authenticated)
    }

    pub fn auth_stage(&self) -> AuthStage {
        self.with_state(AppState::auth_stage)
    }

    // =========================================================================
    // Session Mutations
    // =========================================================================

    /// Replaces the current user wholesale (`None` clears it).
    pub fn set_user(&self, user: Option<User>) {
        debug!(present = user.is_some(), "set_user");
        self.state.send_modify(|s| s.user = user);
    }

    /// Sets the in-progress local phone number.
    pub fn set_phone_number(&self, phone: impl Into<String>) {
        let phone = phone.into();
        debug!(digits = phone.len(), "set_phone_number");
        self.state.send_modify(|s| s.phone_number = phone);
    }

    /// Sets the authentication flag. Either value ends a pending verification.
    pub fn set_is_authenticated(&self, authenticated: bool) {
        debug!(authenticated, "set_is_authenticated");
        self.state.send_modify(|s| {
            s.is_authenticated = authenticated;
            s.otp_pending = false;
        });
    }

    /// Records that the user has moved on to code entry.
    pub fn begin_verification(&self) {
        debug!("begin_verification");
        self.state.send_modify(|s| s.otp_pending = true);
    }

    /// Stores a new user and marks the session authenticated in one step.
    pub fn sign_in(&self, user: User) {
        debug!("sign_in");
        self.state.send_modify(|s| {
            s.user = Some(user);
            s.is_authenticated = true;
            s.otp_pending = false;
        });
    }

    /// Ends the session: flag false, user absent, phone and pending
    /// verification cleared. The cart and country selection are kept.
    pub fn logout(&self) {
        debug!("logout");
        self.state.send_modify(|s| {
            s.is_authenticated = false;
            s.user = None;
            s.phone_number.clear();
            s.otp_pending = false;
        });
    }

    // =========================================================================
    // Locale
    // =========================================================================

    /// Replaces the selected country.
    ///
    /// Only `&'static` list entries can be passed, so the selection is always
    /// a list member.
    pub fn set_selected_country(&self, country: &'static Country) {
        debug!(country = country.code, "set_selected_country");
        self.state.send_modify(|s| s.selected_country = country);
    }

    // =========================================================================
    // Cart Mutations
    // =========================================================================

    /// Adds one unit of a product (increments an existing line).
    pub fn add_to_cart(&self, product: &Product) {
        debug!(product_id = %product.id, "add_to_cart");
        self.state.send_modify(|s| s.cart.add_product(product));
    }

    /// Removes a product's line. Absent id: no-op, no notification.
    pub fn remove_from_cart(&self, product_id: &str) {
        debug!(product_id = %product_id, "remove_from_cart");
        self.state
            .send_if_modified(|s| s.cart.remove(product_id));
    }

    /// Sets a line's quantity; `quantity <= 0` removes the line.
    /// Absent id: no-op, no notification, no new line.
    pub fn update_cart_quantity(&self, product_id: &str, quantity: i64) {
        debug!(product_id = %product_id, quantity, "update_cart_quantity");
        self.state
            .send_if_modified(|s| s.cart.update_quantity(product_id, quantity));
    }

    /// Empties the cart unconditionally.
    pub fn clear_cart(&self) {
        debug!("clear_cart");
        self.state.send_modify(|s| {
            s.cart.clear();
        });
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Handle
// =============================================================================

/// What a screen holds instead of the store itself.
///
/// Cloneable and cheap. It never keeps the store alive on its own, so once
/// the root shuts down `get()` fails fast instead of mutating a store nobody
/// else can see.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    store: Weak<AppStore>,
}

impl StoreHandle {
    /// A handle that was never attached to a store. Every `get()` fails.
    pub fn detached() -> Self {
        StoreHandle { store: Weak::new() }
    }

    /// Resolves the handle to the live store.
    ///
    /// ## Errors
    /// `StoreError::NotInitialized` if the owning root has shut down or the
    /// handle was created detached.
    pub fn get(&self) -> Result<Arc<AppStore>, StoreError> {
        self.store.upgrade().ok_or(StoreError::NotInitialized)
    }

    /// Whether the store behind this handle is still alive.
    pub fn is_live(&self) -> bool {
        self.store.strong_count() > 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use zamda_core::{find_country, Money};

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_naira(price))
    }

    #[test]
    fn test_fresh_store_defaults() {
        let store = AppStore::new();
        let state = store.snapshot();

        assert!(state.user.is_none());
        assert!(state.cart.is_empty());
        assert_eq!(state.cart_count(), 0);
        assert_eq!(state.selected_country.code, "NG");
        assert_eq!(state.selected_country.dial_code, "+234");
        assert!(state.phone_number.is_empty());
        assert!(!state.is_authenticated);
        assert_eq!(state.auth_stage(), AuthStage::Anonymous);
    }

    #[test]
    fn test_add_same_product_twice() {
        let store = AppStore::new();
        let p = product("1", 2500);

        store.add_to_cart(&p);
        store.add_to_cart(&p);

        let cart = store.cart();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get("1").unwrap().quantity, 2);
        assert_eq!(store.cart_count(), 2);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let store = AppStore::new();
        store.add_to_cart(&product("1", 2500));

        store.update_cart_quantity("1", 0);

        assert!(store.cart().get("1").is_none());
        assert_eq!(store.cart_count(), 0);
    }

    #[test]
    fn test_update_quantity_missing_does_not_create() {
        let store = AppStore::new();
        store.update_cart_quantity("ghost", 4);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_remove_missing_leaves_cart_and_subscribers_untouched() {
        let store = AppStore::new();
        store.add_to_cart(&product("1", 2500));
        let before = store.cart();

        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.remove_from_cart("missing");

        assert_eq!(store.cart(), before);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_clear_cart() {
        let store = AppStore::new();
        store.add_to_cart(&product("1", 2500));
        store.add_to_cart(&product("2", 4500));

        store.clear_cart();

        assert!(store.cart().is_empty());
        assert_eq!(store.cart_count(), 0);
    }

    #[test]
    fn test_cart_count_equals_quantity_sum_after_each_mutation() {
        let store = AppStore::new();
        let check = |store: &AppStore| {
            store.with_state(|s| {
                let sum: i64 = s.cart.items().iter().map(|i| i.quantity).sum();
                assert_eq!(s.cart_count(), sum);
            })
        };

        store.add_to_cart(&product("1", 2500));
        check(&store);
        store.add_to_cart(&product("2", 4500));
        check(&store);
        store.update_cart_quantity("2", 6);
        check(&store);
        store.remove_from_cart("1");
        check(&store);
        store.update_cart_quantity("2", -3);
        check(&store);
        store.clear_cart();
        check(&store);
    }

    #[test]
    fn test_logout_clears_session_from_any_state() {
        let store = AppStore::new();
        store.set_phone_number("8012345678");
        store.begin_verification();
        store.sign_in(User::new("Ada", "Obi", "+2348012345678"));
        assert_eq!(store.auth_stage(), AuthStage::Authenticated);

        store.set_is_authenticated(false);
        store.set_user(None);
        assert!(store.user().is_none());
        assert!(!store.is_authenticated());

        store.sign_in(User::new("Ada", "Obi", "+2348012345678"));
        store.logout();
        assert!(store.user().is_none());
        assert!(!store.is_authenticated());
        assert_eq!(store.auth_stage(), AuthStage::Anonymous);
    }

    #[test]
    fn test_auth_stage_progression() {
        let store = AppStore::new();
        assert_eq!(store.auth_stage(), AuthStage::Anonymous);

        store.set_phone_number("8012345678");
        assert_eq!(store.auth_stage(), AuthStage::PhoneCaptured);

        store.begin_verification();
        assert_eq!(store.auth_stage(), AuthStage::OtpPending);

        store.set_is_authenticated(true);
        assert_eq!(store.auth_stage(), AuthStage::Authenticated);
        assert!(!store.snapshot().otp_pending);
    }

    #[test]
    fn test_set_selected_country() {
        let store = AppStore::new();
        let gh = find_country("GH").unwrap();

        store.set_selected_country(gh);

        assert_eq!(store.selected_country().dial_code, "+233");
    }

    #[test]
    fn test_subscribers_see_mutation_immediately() {
        let store = AppStore::new();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.add_to_cart(&product("1", 2500));

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().cart_count(), 1);
    }

    #[test]
    fn test_handle_fails_fast_after_store_dropped() {
        let store = Arc::new(AppStore::new());
        let handle = store.handle();
        assert!(handle.is_live());
        assert!(handle.get().is_ok());

        drop(store);

        assert!(!handle.is_live());
        assert_eq!(handle.get().unwrap_err(), StoreError::NotInitialized);
    }

    #[test]
    fn test_detached_handle() {
        let handle = StoreHandle::detached();
        assert_eq!(handle.get().unwrap_err(), StoreError::NotInitialized);
    }

    #[test]
    fn test_state_serializes_selected_country() {
        let store = AppStore::new();
        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["selectedCountry"]["dialCode"], "+234");
        assert_eq!(json["isAuthenticated"], false);
    }
}
