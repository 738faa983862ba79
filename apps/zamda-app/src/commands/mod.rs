//! # Commands Module
//!
//! The contract between the view layer and the store. Each command takes the
//! handle it was injected with, resolves it, and returns a serializable
//! response or an `ApiError`.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── session.rs  ◄─── Session snapshot, logout
//! ├── locale.rs   ◄─── Country picker
//! └── catalog.rs  ◄─── Products, categories, order history
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  View                                                                   │
//! │  ────                                                                   │
//! │  add_to_cart(&handle, &catalog, &config, "2")                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  handle.get()?         ◄── STORE_NOT_INITIALIZED after shutdown         │
//! │  catalog lookup?       ◄── NOT_FOUND for unknown ids                    │
//! │  store.add_to_cart()   ◄── mutation + notification                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CartResponse { items, cartCount, summary, formattedTotal }             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod locale;
pub mod session;
