//! Returning-user login: phone and password, then the code screen.

use std::sync::Arc;

use tracing::info;
use zamda_core::validation::sanitize_phone_digits;
use zamda_core::{Country, ValidationError};

use crate::commands::locale;
use crate::error::ApiError;
use crate::navigation::{Navigator, Route};
use crate::state::StoreHandle;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Digits only; `set_phone` strips everything else.
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn set_phone(&mut self, raw: &str) {
        self.phone = sanitize_phone_digits(raw);
    }
}

#[derive(Debug, Clone)]
pub struct LoginFlow {
    store: StoreHandle,
    navigator: Arc<Navigator>,
    pub form: LoginForm,
}

impl LoginFlow {
    pub fn new(store: StoreHandle, navigator: Arc<Navigator>) -> Self {
        LoginFlow {
            store,
            navigator,
            form: LoginForm::default(),
        }
    }

    pub fn choose_country(&self, code: &str) -> Result<Country, ApiError> {
        locale::select_country(&self.store, code)
    }

    /// Phone and password present. Email is optional.
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    fn check(&self) -> Result<(), ValidationError> {
        if self.form.phone.is_empty() {
            return Err(ValidationError::Required {
                field: "phone".to_string(),
            });
        }
        if self.form.password.is_empty() {
            return Err(ValidationError::Required {
                field: "password".to_string(),
            });
        }
        Ok(())
    }

    /// Stores the phone and moves on to code entry in login mode.
    ///
    /// The password is not checked against anything; the code is the proof.
    pub fn submit(&self) -> Result<Route, ApiError> {
        self.check()?;

        let store = self.store.get()?;
        store.set_phone_number(self.form.phone.clone());
        store.begin_verification();
        info!(country = store.selected_country().code, "Login started");

        let route = Route::Otp { from_login: true };
        self.navigator.navigate(route);
        Ok(route)
    }

    /// "Don't have an account?" goes back to phone entry.
    pub fn sign_up_instead(&self) -> Route {
        self.navigator.navigate(Route::PhoneInput);
        Route::PhoneInput
    }
}
