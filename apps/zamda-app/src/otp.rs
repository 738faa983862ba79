//! # One-Time Code Verification
//!
//! Screens never decide on their own whether a code is correct; they ask an
//! `OtpVerifier`. Every verifier first checks the code is six digits.
//!
//! | Policy  | Verifier            | Accepts                    |
//! |---------|---------------------|----------------------------|
//! | `demo`  | `DemoOtpVerifier`   | any well-formed code       |
//! | `fixed` | `FixedCodeVerifier` | exactly the configured one |

use std::fmt::Debug;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use zamda_core::validation::validate_otp_code;
use zamda_core::ValidationError;

use crate::config::{AppConfig, OtpPolicy};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    #[error(transparent)]
    Malformed(#[from] ValidationError),

    #[error("The verification code is incorrect")]
    Rejected,
}

/// Decides whether `code` proves ownership of `phone`.
pub trait OtpVerifier: Send + Sync + Debug {
    fn verify(&self, phone: &str, code: &str) -> Result<(), OtpError>;
}

/// Accepts any six-digit code. Demo builds only.
#[derive(Debug)]
pub struct DemoOtpVerifier {
    _private: (),
}

impl DemoOtpVerifier {
    pub fn new() -> Self {
        warn!("OTP verification is in demo mode: any 6-digit code is accepted");
        DemoOtpVerifier { _private: () }
    }
}

impl Default for DemoOtpVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpVerifier for DemoOtpVerifier {
    fn verify(&self, phone: &str, code: &str) -> Result<(), OtpError> {
        validate_otp_code(code)?;
        debug!(phone_digits = phone.len(), "Demo verifier accepted code");
        Ok(())
    }
}

/// Accepts exactly one code.
#[derive(Debug, Clone)]
pub struct FixedCodeVerifier {
    code: String,
}

impl FixedCodeVerifier {
    pub fn new(code: impl Into<String>) -> Self {
        FixedCodeVerifier { code: code.into() }
    }
}

impl OtpVerifier for FixedCodeVerifier {
    fn verify(&self, _phone: &str, code: &str) -> Result<(), OtpError> {
        validate_otp_code(code)?;
        if code != self.code {
            return Err(OtpError::Rejected);
        }
        Ok(())
    }
}

/// Builds the verifier selected by `otp.policy`.
///
/// A `fixed` policy without a code falls back to rejecting everything;
/// `AppConfig::validate` refuses that combination up front.
pub fn verifier_from_config(config: &AppConfig) -> Arc<dyn OtpVerifier> {
    match config.otp.policy {
        OtpPolicy::Demo => Arc::new(DemoOtpVerifier::new()),
        OtpPolicy::Fixed => Arc::new(FixedCodeVerifier::new(
            config.otp.code.clone().unwrap_or_default(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_accepts_any_well_formed_code() {
        let verifier = DemoOtpVerifier::new();
        assert!(verifier.verify("+2348012345678", "000000").is_ok());
        assert!(verifier.verify("+2348012345678", "987654").is_ok());
    }

    #[test]
    fn test_every_verifier_checks_syntax() {
        let demo = DemoOtpVerifier::new();
        let fixed = FixedCodeVerifier::new("123456");

        for code in ["", "12345", "1234567", "12a456"] {
            assert!(matches!(demo.verify("p", code), Err(OtpError::Malformed(_))));
            assert!(matches!(fixed.verify("p", code), Err(OtpError::Malformed(_))));
        }
    }

    #[test]
    fn test_fixed_code() {
        let verifier = FixedCodeVerifier::new("424242");
        assert!(verifier.verify("p", "424242").is_ok());
        assert_eq!(verifier.verify("p", "111111"), Err(OtpError::Rejected));
    }

    #[test]
    fn test_verifier_from_config() {
        let mut config = AppConfig::default();
        config.otp.policy = OtpPolicy::Fixed;
        config.otp.code = Some("424242".to_string());

        let verifier = verifier_from_config(&config);
        assert!(verifier.verify("p", "424242").is_ok());
        assert!(verifier.verify("p", "000000").is_err());

        let demo = verifier_from_config(&AppConfig::default());
        assert!(demo.verify("p", "000000").is_ok());
    }
}
