//! # Error Types
//!
//! Domain-specific error types for zamda-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  zamda-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog lookups, wrapped validation failures   │
//! │  └── ValidationError  - Form / phone / OTP checks                      │
//! │                                                                         │
//! │  zamda-app errors                                                      │
//! │  ├── StoreError       - Store accessed outside a live session          │
//! │  ├── OtpError         - Verification code rejected                     │
//! │  ├── ConfigError      - Bad config file or env override                │
//! │  └── ApiError         - What the view layer sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → View layer             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is NOT here: the cart and the session setters have no failure
//! modes. Removing a product that is not in the cart is a defined no-op.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order id is not in the order history.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Country code is not in the static country list.
    ///
    /// ## When This Occurs
    /// - A front end sends a country code it built itself
    /// - A config file names a country the client does not serve
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These come from the checks the screens run before they call into the
/// session store. The store itself never validates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Invalid format (e.g. a non-digit in an OTP, a malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must match do not (password confirmation).
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },

    /// A checkbox that must be ticked is not.
    #[error("{field} must be accepted")]
    NotAccepted { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A date lies in the future.
    #[error("{field} cannot be in the future")]
    InFuture { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
