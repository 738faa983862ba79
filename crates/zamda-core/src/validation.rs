//! # Validation Module
//!
//! Checks the screens run on user input before they call into the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Happens                           │
//! │                                                                         │
//! │  Screen / flow (zamda-app::flows)                                      │
//! │  ├── sanitize_phone_digits, validate_phone_number                      │
//! │  ├── validate_otp_code                                                 │
//! │  └── PasswordCriteria, validate_name, validate_date_of_birth           │
//! │           │  only valid input gets past here                           │
//! │           ▼                                                             │
//! │  Session store (zamda-app::state)                                      │
//! │  └── NO validation. Setters cannot reject a value.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use zamda_core::validation::{sanitize_phone_digits, validate_phone_number};
//!
//! let digits = sanitize_phone_digits("0801-234 5678");
//! assert_eq!(digits, "08012345678");
//! assert!(validate_phone_number(&digits).is_ok());
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ValidationError;
use crate::types::Country;
use crate::{
    MAX_ITEM_QUANTITY, MAX_PHONE_DIGITS, MIN_PASSWORD_LENGTH, MIN_PHONE_DIGITS, OTP_LENGTH,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Phone
// =============================================================================

/// Strips everything that is not an ASCII digit and keeps at most
/// `MAX_PHONE_DIGITS` (15) of what remains.
pub fn sanitize_phone_digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect()
}

/// Validates a local phone number (digits only, no dial code).
///
/// ## Rules
/// - Must not be empty
/// - At least `MIN_PHONE_DIGITS` (8) digits
/// - Digits only
pub fn validate_phone_number(digits: &str) -> ValidationResult<()> {
    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if digits.len() < MIN_PHONE_DIGITS {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: MIN_PHONE_DIGITS,
        });
    }

    Ok(())
}

/// Prefixes local digits with the country's dial code.
///
/// ```rust
/// use zamda_core::catalog::default_country;
/// use zamda_core::validation::compose_full_phone;
///
/// assert_eq!(compose_full_phone(default_country(), "8012345678"), "+2348012345678");
/// ```
pub fn compose_full_phone(country: &Country, digits: &str) -> String {
    format!("{}{}", country.dial_code, digits)
}

// =============================================================================
// Cart
// =============================================================================

/// Validates a quantity typed into a cart line.
///
/// ## Rules
/// - Zero or below passes: it means "remove this line"
/// - Must not exceed `MAX_ITEM_QUANTITY` (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// One-Time Code
// =============================================================================

/// Checks that a code is exactly `OTP_LENGTH` (6) ASCII digits.
///
/// This is a syntax check only. Whether the code is *correct* is decided by
/// an `OtpVerifier` in the app layer.
pub fn validate_otp_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "verification code".to_string(),
        });
    }

    if !code.chars().all(|c| c.is_ascii_digit()) || code.len() != OTP_LENGTH {
        return Err(ValidationError::InvalidFormat {
            field: "verification code".to_string(),
            reason: format!("must be exactly {} digits", OTP_LENGTH),
        });
    }

    Ok(())
}

// =============================================================================
// Registration Fields
// =============================================================================

/// Password strength checklist, one flag per rule shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCriteria {
    pub min_length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
}

impl PasswordCriteria {
    /// Evaluates every rule against a candidate password.
    pub fn evaluate(password: &str) -> Self {
        PasswordCriteria {
            min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
        }
    }

    /// All rules satisfied.
    pub fn is_met(&self) -> bool {
        self.min_length && self.uppercase && self.lowercase && self.digit
    }

    /// `(label, met)` pairs in display order.
    pub fn checklist(&self) -> [(&'static str, bool); 4] {
        [
            ("At least 6 characters", self.min_length),
            ("Uppercase letter", self.uppercase),
            ("Lowercase letter", self.lowercase),
            ("Number", self.digit),
        ]
    }
}

/// Validates a password against [`PasswordCriteria`].
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    let criteria = PasswordCriteria::evaluate(password);
    if !criteria.min_length {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if !criteria.is_met() {
        return Err(ValidationError::InvalidFormat {
            field: "password".to_string(),
            reason: "must contain an uppercase letter, a lowercase letter and a number"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates that a required name field is not blank.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Parses an ISO `YYYY-MM-DD` date of birth that is not after `today`.
///
/// `today` is passed in so this module never reads the clock.
pub fn validate_date_of_birth(text: &str, today: NaiveDate) -> ValidationResult<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "date of birth".to_string(),
        });
    }

    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "date of birth".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })?;

    if date > today {
        return Err(ValidationError::InFuture {
            field: "date of birth".to_string(),
        });
    }

    Ok(date)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_country;

    #[test]
    fn test_sanitize_phone_digits() {
        assert_eq!(sanitize_phone_digits("+234 (801) 234-5678"), "2348012345678");
        assert_eq!(sanitize_phone_digits("abc"), "");
        assert_eq!(sanitize_phone_digits("٣٤"), "");
    }

    #[test]
    fn test_sanitize_phone_digits_caps_length() {
        assert_eq!(sanitize_phone_digits("1234567890123456789"), "123456789012345");
        assert_eq!(sanitize_phone_digits("12-34-56-78-90-12-34-56"), "123456789012345");
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(-3).is_ok());

        assert!(matches!(
            validate_quantity(1000),
            Err(ValidationError::OutOfRange { max: 999, .. })
        ));
        assert!(validate_quantity(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("80123456").is_ok());
        assert!(validate_phone_number("8012345678").is_ok());

        assert_eq!(
            validate_phone_number("").unwrap_err(),
            ValidationError::Required {
                field: "phone".to_string()
            }
        );
        assert!(matches!(
            validate_phone_number("8012345"),
            Err(ValidationError::TooShort { min: 8, .. })
        ));
        assert!(matches!(
            validate_phone_number("8012345a9"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_compose_full_phone_uses_dial_code() {
        let ke = find_country("KE").unwrap();
        assert_eq!(compose_full_phone(ke, "712345678"), "+254712345678");
    }

    #[test]
    fn test_validate_otp_code() {
        assert!(validate_otp_code("123456").is_ok());
        assert!(validate_otp_code("000000").is_ok());

        assert!(validate_otp_code("").is_err());
        assert!(validate_otp_code("12345").is_err());
        assert!(validate_otp_code("1234567").is_err());
        assert!(validate_otp_code("12a456").is_err());
    }

    #[test]
    fn test_password_criteria() {
        let weak = PasswordCriteria::evaluate("abc");
        assert!(!weak.min_length);
        assert!(weak.lowercase);
        assert!(!weak.is_met());

        let strong = PasswordCriteria::evaluate("Secret1");
        assert!(strong.is_met());
        assert!(strong.checklist().iter().all(|(_, met)| *met));

        assert!(validate_password("Secret1").is_ok());
        assert!(matches!(
            validate_password("Sec1"),
            Err(ValidationError::TooShort { min: 6, .. })
        ));
        assert!(matches!(
            validate_password("secret1"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("first name", "Ada").is_ok());
        assert!(validate_name("first name", "   ").is_err());
    }

    #[test]
    fn test_validate_date_of_birth() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let dob = validate_date_of_birth("1990-05-17", today).unwrap();
        assert_eq!(dob, NaiveDate::from_ymd_opt(1990, 5, 17).unwrap());

        assert!(validate_date_of_birth("2024-06-01", today).is_ok());
        assert!(matches!(
            validate_date_of_birth("2030-01-01", today),
            Err(ValidationError::InFuture { .. })
        ));
        assert!(matches!(
            validate_date_of_birth("17/05/1990", today),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            validate_date_of_birth("", today),
            Err(ValidationError::Required { .. })
        ));
    }
}
