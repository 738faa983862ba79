//! Phone entry: country picker plus the local number.

use std::sync::Arc;

use tracing::info;
use zamda_core::validation::{compose_full_phone, sanitize_phone_digits, validate_phone_number};
use zamda_core::{Country, MIN_PHONE_DIGITS};

use crate::commands::locale;
use crate::error::ApiError;
use crate::navigation::{Navigator, Route};
use crate::state::StoreHandle;

#[derive(Debug, Clone)]
pub struct PhoneEntryFlow {
    store: StoreHandle,
    navigator: Arc<Navigator>,
}

impl PhoneEntryFlow {
    pub fn new(store: StoreHandle, navigator: Arc<Navigator>) -> Self {
        PhoneEntryFlow { store, navigator }
    }

    /// Handles a keystroke or paste: keeps only digits, at most 15 of them,
    /// and stores them. Returns what the field should now show.
    pub fn input(&self, raw: &str) -> Result<String, ApiError> {
        let digits = sanitize_phone_digits(raw);
        self.store.get()?.set_phone_number(digits.clone());
        Ok(digits)
    }

    pub fn choose_country(&self, code: &str) -> Result<Country, ApiError> {
        locale::select_country(&self.store, code)
    }

    /// "Continue" is enabled once there are enough digits.
    pub fn can_continue(&self) -> Result<bool, ApiError> {
        Ok(self.store.get()?.phone_number().len() >= MIN_PHONE_DIGITS)
    }

    /// Dial code plus local digits, as the OTP screen shows it.
    pub fn full_phone(&self) -> Result<String, ApiError> {
        let store = self.store.get()?;
        Ok(store.with_state(|s| compose_full_phone(s.selected_country, &s.phone_number)))
    }

    /// Moves on to code entry for a new registration.
    pub fn submit(&self) -> Result<Route, ApiError> {
        let store = self.store.get()?;
        validate_phone_number(&store.phone_number())?;

        store.begin_verification();
        info!(country = store.selected_country().code, "Phone captured, awaiting code");

        let route = Route::Otp { from_login: false };
        self.navigator.navigate(route);
        Ok(route)
    }
}
