//! # Domain Types
//!
//! Records shared between the session store and the screens.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Product      │   │    Country      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  first/last     │   │  id (unique)    │   │  code (unique)  │       │
//! │  │  phone (+dial)  │   │  name, price    │   │  dial_code      │       │
//! │  │  email?, dob?   │   │  category       │   │  flag           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │   owned by the store    immutable catalog     &'static, list only      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │  OrderStatus    │   │   AuthStage     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id "ORD-001"   │   │  Processing     │   │  Anonymous      │       │
//! │  │  placed_on      │   │  InTransit      │   │  PhoneCaptured  │       │
//! │  │  total          │   │  Delivered      │   │  OtpPending     │       │
//! │  └─────────────────┘   └─────────────────┘   │  Authenticated  │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// User
// =============================================================================

/// The signed-in user's identity record.
///
/// Created by registration or the demo Google sign-up, replaced wholesale on
/// login, cleared on logout. Only the session store holds the live copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    /// Full international number, dial code included (`+2348012345678`).
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// Creates a user with just the required fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        User {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            email: None,
            date_of_birth: None,
            address: None,
            avatar: None,
        }
    }

    /// "First Last", trimmed. `None` when both names are blank.
    pub fn full_name(&self) -> Option<String> {
        let joined = format!("{} {}", self.first_name, self.last_name);
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Avatar letter: first character of the first name, or `U`.
    pub fn initial(&self) -> char {
        self.first_name.chars().next().unwrap_or('U')
    }
}

// =============================================================================
// Product & Category
// =============================================================================

/// A catalog entry. Immutable; the store copies it into cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique within the catalog. Cart lines are keyed on it.
    pub id: String,
    pub name: String,
    /// Unit price in whole naira.
    pub price: Money,
    /// Image asset reference.
    pub image: String,
    /// Category label ("Pain Relief", "Vitamins", ...).
    pub category: String,
    #[serde(default)]
    pub is_liked: bool,
}

impl Product {
    /// Builds an ad-hoc product (tests, seed data).
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            category: String::new(),
            is_liked: false,
        }
    }
}

/// A service category tile on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Icon key the view layer maps to a glyph (`stethoscope`, `pill`, ...).
    pub icon: String,
    /// Theme tint for the tile (`primary`, `secondary`, `success`, ...).
    pub color: String,
}

// =============================================================================
// Country
// =============================================================================

/// A locale record from the static country list.
///
/// Only `&'static Country` values from [`crate::catalog::COUNTRIES`] exist at
/// runtime, which is how the store guarantees its selected country is always
/// a list member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO-like two-letter code, unique in the list.
    #[ts(type = "string")]
    pub code: &'static str,
    #[ts(type = "string")]
    pub name: &'static str,
    /// International prefix, `+` included.
    #[ts(type = "string")]
    pub dial_code: &'static str,
    #[ts(type = "string")]
    pub flag: &'static str,
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.flag, self.name, self.dial_code)
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Fulfilment status of a past order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Processing,
    InTransit,
    Delivered,
}

impl OrderStatus {
    /// Label shown on the status badge.
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An entry in the order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[ts(as = "String")]
    pub placed_on: NaiveDate,
    pub status: OrderStatus,
    pub item_count: u32,
    pub total: Money,
}

// =============================================================================
// Authentication Stage
// =============================================================================

/// Where the session is in the sign-in progression.
///
/// ```text
/// Anonymous ──set phone──► PhoneCaptured ──begin verification──► OtpPending
///     ▲                                                              │
///     └──────────── logout ◄──── Authenticated ◄──── code accepted ──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum AuthStage {
    #[default]
    Anonymous,
    PhoneCaptured,
    OtpPending,
    Authenticated,
}

impl AuthStage {
    /// Derives the stage from the session fields.
    ///
    /// The authenticated flag wins, then a started verification, then a
    /// captured phone number.
    pub fn derive(is_authenticated: bool, otp_pending: bool, phone_number: &str) -> Self {
        if is_authenticated {
            AuthStage::Authenticated
        } else if otp_pending {
            AuthStage::OtpPending
        } else if !phone_number.is_empty() {
            AuthStage::PhoneCaptured
        } else {
            AuthStage::Anonymous
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_full_name() {
        let user = User::new("Ada", "Obi", "+2348012345678");
        assert_eq!(user.full_name().as_deref(), Some("Ada Obi"));

        let only_first = User::new("Ada", "", "+234");
        assert_eq!(only_first.full_name().as_deref(), Some("Ada"));

        let blank = User::new("", " ", "+234");
        assert_eq!(blank.full_name(), None);
    }

    #[test]
    fn test_user_initial_fallback() {
        assert_eq!(User::new("Ada", "Obi", "").initial(), 'A');
        assert_eq!(User::new("", "Obi", "").initial(), 'U');
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let mut user = User::new("Ada", "Obi", "+2348012345678");
        user.date_of_birth = NaiveDate::from_ymd_opt(1990, 5, 17);

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["dateOfBirth"], "1990-05-17");
        assert!(json["email"].is_null());
    }

    #[test]
    fn test_order_status_labels_and_wire_names() {
        assert_eq!(OrderStatus::InTransit.label(), "In Transit");
        assert_eq!(
            serde_json::to_string(&OrderStatus::InTransit).unwrap(),
            "\"in-transit\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);
    }

    #[test]
    fn test_auth_stage_derivation() {
        assert_eq!(AuthStage::derive(false, false, ""), AuthStage::Anonymous);
        assert_eq!(
            AuthStage::derive(false, false, "8012345678"),
            AuthStage::PhoneCaptured
        );
        assert_eq!(
            AuthStage::derive(false, true, "8012345678"),
            AuthStage::OtpPending
        );
        assert_eq!(AuthStage::derive(true, true, ""), AuthStage::Authenticated);
    }

    #[test]
    fn test_auth_stage_default() {
        assert_eq!(AuthStage::default(), AuthStage::Anonymous);
    }
}
