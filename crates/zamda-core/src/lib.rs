//! # zamda-core: Pure Domain Logic for the Zamda Health Store
//!
//! This crate holds everything about the Zamda client that can be expressed
//! as plain values and pure functions: money, domain records, the static
//! catalog, cart arithmetic and the input checks the screens run before they
//! touch session state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Zamda Client Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 View layer (screens, out of scope)              │   │
//! │  │  Splash ─► Phone ─► OTP ─► Register/Login ─► Dashboard/Cart     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        zamda-app: store, flows, commands, navigation            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ zamda-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  User     │  │   Money   │  │   Cart    │  │  phone    │  │   │
//! │  │   │  Product  │  │  (naira)  │  │  Summary  │  │  OTP, pw  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                      ┌───────────┐                              │   │
//! │  │                      │  catalog  │ countries, products, orders  │   │
//! │  │                      └───────────┘                              │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (User, Product, Country, Order, AuthStage)
//! - [`money`] - Whole-naira money type with grouped display
//! - [`catalog`] - Static country list, products, categories, sample orders
//! - [`cart`] - Cart line items and the one-line-per-product invariant
//! - [`validation`] - Checks the view layer runs before calling the store
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use zamda_core::cart::Cart;
//! use zamda_core::catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//! let paracetamol = catalog.product("1").unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_product(paracetamol);
//! cart.add_product(paracetamol);
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.count(), 2);
//! assert_eq!(cart.subtotal().to_string(), "₦5,000");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem, CartSummary};
pub use catalog::{default_country, find_country, Catalog, COUNTRIES};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum number of digits the phone screen requires before it lets the
/// user continue to verification.
pub const MIN_PHONE_DIGITS: usize = 8;

/// Longest local number the phone field accepts.
pub const MAX_PHONE_DIGITS: usize = 15;

/// Number of digits in a one-time verification code.
pub const OTP_LENGTH: usize = 6;

/// Minimum password length on the registration form.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Largest quantity the cart screens let a single line reach.
///
/// The store itself accepts any positive quantity; this cap is enforced by
/// the commands sitting in front of it.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Flat delivery fee (whole naira) charged when the cart is not empty.
pub const DEFAULT_DELIVERY_FEE: i64 = 1500;
