//! # Cart
//!
//! The shopping cart as a plain value. The session store wraps one of these
//! and adds change notification; every rule about line items lives here.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  add_product(P) ────────► P.id present?  yes ─► quantity += 1          │
//! │                                          no  ─► push {P, quantity: 1}  │
//! │                                                                         │
//! │  update_quantity(id, q) ► q <= 0 ─► remove(id)                         │
//! │                           else   ─► set quantity (absent id: no-op)    │
//! │                                                                         │
//! │  remove(id) ────────────► retain others (absent id: no-op)             │
//! │                                                                         │
//! │  clear() ───────────────► empty                                        │
//! │                                                                         │
//! │  count() ───────────────► Σ quantity, recomputed on every read         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id.
//! - Every line has quantity >= 1.
//! - Lines keep insertion order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Line Item
// =============================================================================

/// A product in the cart together with how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Copy of the catalog entry at the time it was added.
    #[serde(flatten)]
    pub product: Product,
    /// Always positive.
    pub quantity: i64,
}

impl CartLineItem {
    fn new(product: Product) -> Self {
        CartLineItem {
            product,
            quantity: 1,
        }
    }

    /// Product id this line is keyed on.
    #[inline]
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Ordered collection of line items, keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of a product.
    ///
    /// An existing line for the same id gets its quantity bumped by exactly
    /// one and is otherwise untouched; the incoming product copy is ignored.
    pub fn add_product(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return;
        }
        self.items.push(CartLineItem::new(product.clone()));
    }

    /// Removes the line for `product_id`.
    ///
    /// Returns `false` when there was no such line, which is not an error.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != before
    }

    /// Sets the quantity of an existing line.
    ///
    /// `quantity <= 0` behaves exactly like [`Cart::remove`]. An absent id is
    /// a no-op and never creates a line. Returns whether the cart changed.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        match self.items.iter_mut().find(|i| i.product.id == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Removes every line. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Line for a product id, if present.
    pub fn get(&self, product_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Total units across all lines (the badge number on the cart tab).
    ///
    /// Saturates at `i64::MAX`; the store accepts any positive quantity.
    pub fn count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.quantity))
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Totals for the checkout panel.
    ///
    /// The delivery fee only applies to a non-empty cart.
    pub fn summary(&self, delivery_fee: Money) -> CartSummary {
        let subtotal = self.subtotal();
        let delivery_fee = if self.is_empty() {
            Money::zero()
        } else {
            delivery_fee
        };
        CartSummary {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Subtotal, delivery fee and grand total for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
