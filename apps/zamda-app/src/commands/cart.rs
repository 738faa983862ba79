//! # Cart Commands
//!
//! Cart manipulation for the dashboard "Add" buttons and the cart tab.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐                              │
//! │  │  Empty   │───────────────►│ In Cart  │◄──┐ add_to_cart               │
//! │  │  Cart    │                │          │───┘ update_cart_item          │
//! │  └──────────┘◄───────────────└──────────┘     remove_from_cart          │
//! │        ▲      clear_cart / last line removed                            │
//! │        └── logout keeps the cart as it is                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;
use zamda_core::validation::validate_quantity;
use zamda_core::{Cart, CartLineItem, CartSummary, Catalog, ValidationError, MAX_ITEM_QUANTITY};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::state::StoreHandle;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    /// Badge number: total units, not lines.
    pub cart_count: i64,
    pub summary: CartSummary,
    pub formatted_total: String,
}

impl CartResponse {
    fn build(cart: &Cart, config: &AppConfig) -> Self {
        let summary = cart.summary(config.delivery_fee());
        CartResponse {
            items: cart.items().to_vec(),
            cart_count: cart.count(),
            summary,
            formatted_total: config.format_currency(summary.total),
        }
    }
}

fn respond(store: &StoreHandle, config: &AppConfig) -> Result<CartResponse, ApiError> {
    let store = store.get()?;
    Ok(store.with_state(|s| CartResponse::build(&s.cart, config)))
}

/// Gets the current cart contents.
pub fn get_cart(store: &StoreHandle, config: &AppConfig) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    respond(store, config)
}

/// Adds one unit of a catalog product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity goes up by one
/// - Not in cart: appended with quantity 1
/// - Unknown id: `NOT_FOUND`, cart untouched
/// - Line already at `MAX_ITEM_QUANTITY`: `VALIDATION_ERROR`, cart untouched
pub fn add_to_cart(
    store: &StoreHandle,
    catalog: &Catalog,
    config: &AppConfig,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = catalog.require_product(product_id)?;
    let session = store.get()?;

    let current = session.with_state(|s| s.cart.get(product_id).map(|i| i.quantity));
    if current.is_some_and(|q| q >= MAX_ITEM_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        }
        .into());
    }
    session.add_to_cart(product);

    respond(store, config)
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity 0 or below: removes the line
/// - Product not in cart: nothing happens
/// - Above `MAX_ITEM_QUANTITY`: `VALIDATION_ERROR`, cart untouched
pub fn update_cart_item(
    store: &StoreHandle,
    config: &AppConfig,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity, "update_cart_item command");

    validate_quantity(quantity)?;
    store.get()?.update_cart_quantity(product_id, quantity);

    respond(store, config)
}

/// Removes a line from the cart. Missing lines are ignored.
pub fn remove_from_cart(
    store: &StoreHandle,
    config: &AppConfig,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    store.get()?.remove_from_cart(product_id);

    respond(store, config)
}

/// Clears all items from the cart.
pub fn clear_cart(store: &StoreHandle, config: &AppConfig) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    store.get()?.clear_cart();

    respond(store, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::AppStore;
    use std::sync::Arc;

    fn setup() -> (Arc<AppStore>, StoreHandle, Catalog, AppConfig) {
        let store = Arc::new(AppStore::new());
        let handle = store.handle();
        (store, handle, Catalog::builtin(), AppConfig::default())
    }

    #[test]
    fn test_add_twice_then_summary() {
        let (_store, handle, catalog, config) = setup();

        add_to_cart(&handle, &catalog, &config, "1").unwrap();
        let cart = add_to_cart(&handle, &catalog, &config, "1").unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.cart_count, 2);
        assert_eq!(cart.summary.subtotal.naira(), 5000);
        assert_eq!(cart.summary.delivery_fee.naira(), 1500);
        assert_eq!(cart.formatted_total, "₦6,500");
    }

    #[test]
    fn test_unknown_product_is_not_found() {
        let (store, handle, catalog, config) = setup();

        let err = add_to_cart(&handle, &catalog, &config, "999").unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(store.cart_count(), 0);
    }

    #[test]
    fn test_update_and_remove() {
        let (_store, handle, catalog, config) = setup();
        add_to_cart(&handle, &catalog, &config, "2").unwrap();

        let cart = update_cart_item(&handle, &config, "2", 4).unwrap();
        assert_eq!(cart.cart_count, 4);

        let cart = update_cart_item(&handle, &config, "2", 0).unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.summary.total.naira(), 0);

        let cart = remove_from_cart(&handle, &config, "2").unwrap();
        assert_eq!(cart.cart_count, 0);
    }

    #[test]
    fn test_update_above_max_is_rejected() {
        let (store, handle, catalog, config) = setup();
        add_to_cart(&handle, &catalog, &config, "1").unwrap();

        let err = update_cart_item(&handle, &config, "1", 4_000_000_000_000_000).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(store.cart_count(), 1);

        let cart = update_cart_item(&handle, &config, "1", MAX_ITEM_QUANTITY).unwrap();
        assert_eq!(cart.cart_count, MAX_ITEM_QUANTITY);
        assert_eq!(cart.summary.subtotal.naira(), 2500 * MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_add_stops_at_max() {
        let (store, handle, catalog, config) = setup();
        add_to_cart(&handle, &catalog, &config, "1").unwrap();
        update_cart_item(&handle, &config, "1", MAX_ITEM_QUANTITY).unwrap();

        let err = add_to_cart(&handle, &catalog, &config, "1").unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(store.cart_count(), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_raw_store_quantities_never_panic_in_responses() {
        let (store, handle, catalog, config) = setup();
        add_to_cart(&handle, &catalog, &config, "1").unwrap();
        add_to_cart(&handle, &catalog, &config, "2").unwrap();

        store.update_cart_quantity("1", i64::MAX);
        store.update_cart_quantity("2", 1);

        assert_eq!(store.cart_count(), i64::MAX);
        let cart = get_cart(&handle, &config).unwrap();
        assert_eq!(cart.summary.total.naira(), i64::MAX);
    }

    #[test]
    fn test_clear_cart() {
        let (_store, handle, catalog, config) = setup();
        add_to_cart(&handle, &catalog, &config, "1").unwrap();
        add_to_cart(&handle, &catalog, &config, "4").unwrap();

        let cart = clear_cart(&handle, &config).unwrap();

        assert_eq!(cart.cart_count, 0);
        assert_eq!(get_cart(&handle, &config).unwrap(), cart);
    }

    #[test]
    fn test_commands_fail_after_store_dropped() {
        let (store, handle, catalog, config) = setup();
        drop(store);

        let err = add_to_cart(&handle, &catalog, &config, "1").unwrap_err();
        assert!(err.is_store_not_initialized());
        assert!(get_cart(&handle, &config).unwrap_err().is_store_not_initialized());
    }

    #[test]
    fn test_response_shape() {
        let (_store, handle, catalog, config) = setup();
        let cart = add_to_cart(&handle, &catalog, &config, "3").unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["cartCount"], 1);
        assert_eq!(json["summary"]["deliveryFee"], 1500);
        assert_eq!(json["items"][0]["name"], "Ibuprofen 400mg");
    }
}
