//! # API Error Type
//!
//! Unified error type for commands and flows.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Zamda client                       │
//! │                                                                         │
//! │  Screen                         Rust session layer                      │
//! │  ──────                         ──────────────────                      │
//! │                                                                         │
//! │  submit phone                                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Flow / command: Result<T, ApiError>                             │  │
//! │  │                                                                  │  │
//! │  │  Handle outlived the session? ── StoreError::NotInitialized ──┐ │  │
//! │  │  Bad input?  ─────────────────── ValidationError ─────────────┤ │  │
//! │  │  Unknown product / country? ──── CoreError ───────────────────┤ │  │
//! │  │  Code rejected? ──────────────── OtpError ────────────────────┤ │  │
//! │  │                                                               ▼ │  │
//! │  │                                                          ApiError│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR", "message": "phone must be at least 8…" } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store operations themselves never fail. `STORE_NOT_INITIALIZED` is a
//! programming error (a handle used after shutdown) and is surfaced loudly,
//! never swallowed.

use serde::Serialize;
use zamda_core::{CoreError, ValidationError};

use crate::otp::OtpError;
use crate::state::StoreError;
use crate::timer::TimerError;

/// Error returned from commands and flows.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product, order or country
    NotFound,

    /// Input failed a screen-level check
    ValidationError,

    /// Store handle used outside a live application session
    StoreNotInitialized,

    /// Protected screen opened without a signed-in session
    Unauthenticated,

    /// One-time code rejected by the verifier
    VerificationFailed,

    /// Anything else (runtime missing for timers, etc.)
    Internal,
}

/// Convenience alias for command results.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthenticated error.
    pub fn unauthenticated(screen: &str) -> Self {
        ApiError::new(
            ErrorCode::Unauthenticated,
            format!("{} requires a signed-in session", screen),
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// True for the "store not initialized" usage error.
    pub fn is_store_not_initialized(&self) -> bool {
        self.code == ErrorCode::StoreNotInitialized
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            CoreError::UnknownCountry(code) => {
                ApiError::validation(format!("Unknown country code: {}", code))
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("{}", err);
        ApiError::new(ErrorCode::StoreNotInitialized, err.to_string())
    }
}

impl From<OtpError> for ApiError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::Malformed(e) => ApiError::from(e),
            OtpError::Rejected => ApiError::new(ErrorCode::VerificationFailed, err.to_string()),
        }
    }
}

impl From<TimerError> for ApiError {
    fn from(err: TimerError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
