//! # Session Commands
//!
//! What the header, account tab and guards read, plus logout.

use serde::Serialize;
use tracing::{debug, info};
use zamda_core::{AuthStage, Country, User};

use crate::error::ApiError;
use crate::state::StoreHandle;

/// Everything a screen needs to render session-dependent chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub auth_stage: AuthStage,
    pub phone_number: String,
    pub selected_country: Country,
    pub cart_count: i64,
}

/// Gets a snapshot of the session.
pub fn get_session(store: &StoreHandle) -> Result<SessionResponse, ApiError> {
    debug!("get_session command");

    let store = store.get()?;
    Ok(store.with_state(|s| SessionResponse {
        user: s.user.clone(),
        is_authenticated: s.is_authenticated,
        auth_stage: s.auth_stage(),
        phone_number: s.phone_number.clone(),
        selected_country: *s.selected_country,
        cart_count: s.cart_count(),
    }))
}

/// Signs out. The cart and selected country survive.
pub fn logout(store: &StoreHandle) -> Result<SessionResponse, ApiError> {
    info!("logout command");

    store.get()?.logout();

    get_session(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppStore;
    use std::sync::Arc;
    use zamda_core::{Money, Product};

    #[test]
    fn test_fresh_session() {
        let store = Arc::new(AppStore::new());
        let session = get_session(&store.handle()).unwrap();

        assert!(session.user.is_none());
        assert!(!session.is_authenticated);
        assert_eq!(session.auth_stage, AuthStage::Anonymous);
        assert_eq!(session.selected_country.dial_code, "+234");
        assert_eq!(session.cart_count, 0);
    }

    #[test]
    fn test_logout_keeps_cart() {
        let store = Arc::new(AppStore::new());
        store.sign_in(User::new("Ada", "Obi", "+2348012345678"));
        store.add_to_cart(&Product::new("1", "Paracetamol 500mg", Money::from_naira(2500)));

        let session = logout(&store.handle()).unwrap();

        assert!(session.user.is_none());
        assert!(!session.is_authenticated);
        assert_eq!(session.cart_count, 1);
    }

    #[test]
    fn test_session_shape() {
        let store = Arc::new(AppStore::new());
        store.set_phone_number("8012345678");

        let json = serde_json::to_value(get_session(&store.handle()).unwrap()).unwrap();
        assert_eq!(json["authStage"], "phoneCaptured");
        assert_eq!(json["phoneNumber"], "8012345678");
        assert_eq!(json["selectedCountry"]["code"], "NG");
    }

    #[test]
    fn test_detached_handle() {
        let err = get_session(&StoreHandle::detached()).unwrap_err();
        assert!(err.is_store_not_initialized());
    }
}
