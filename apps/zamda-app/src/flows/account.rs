//! Account tab: profile rows and logout.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use zamda_core::User;

use crate::error::ApiError;
use crate::navigation::{Navigator, Route};
use crate::state::StoreHandle;

/// Shown for any profile field the user has not filled in.
pub const NOT_SET: &str = "Not set";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRow {
    pub label: &'static str,
    pub value: String,
}

impl ProfileRow {
    fn new(label: &'static str, value: Option<String>) -> Self {
        ProfileRow {
            label,
            value: value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| NOT_SET.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountView {
    store: StoreHandle,
    navigator: Arc<Navigator>,
}

impl AccountView {
    pub fn new(store: StoreHandle, navigator: Arc<Navigator>) -> Self {
        AccountView { store, navigator }
    }

    /// Full Name, Phone, Email, Date of Birth, Address.
    pub fn profile_rows(&self) -> Result<Vec<ProfileRow>, ApiError> {
        let user = self.store.get()?.user();
        let user = user.as_ref();
        let field = |f: fn(&User) -> Option<String>| user.and_then(f);

        Ok(vec![
            ProfileRow::new("Full Name", field(User::full_name)),
            ProfileRow::new("Phone", field(|u| Some(u.phone.clone()))),
            ProfileRow::new("Email", field(|u| u.email.clone())),
            ProfileRow::new(
                "Date of Birth",
                field(|u| u.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string())),
            ),
            ProfileRow::new("Address", field(|u| u.address.clone())),
        ])
    }

    /// Ends the session and returns to the splash screen.
    pub fn logout(&self) -> Result<Route, ApiError> {
        self.store.get()?.logout();
        info!("User logged out");

        self.navigator.reset_to(Route::Splash);
        Ok(Route::Splash)
    }
}
