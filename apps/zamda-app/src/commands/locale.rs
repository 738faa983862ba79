//! # Locale Commands
//!
//! The country picker next to the phone field.
//!
//! The store only accepts `&'static Country` entries, so a code that is not
//! in the list is turned away here and never reaches it.

use tracing::debug;
use zamda_core::catalog::require_country;
use zamda_core::{Country, COUNTRIES};

use crate::error::ApiError;
use crate::state::StoreHandle;

/// Supported countries in picker order.
pub fn list_countries() -> Vec<Country> {
    COUNTRIES.to_vec()
}

/// Gets the currently selected country.
pub fn selected_country(store: &StoreHandle) -> Result<Country, ApiError> {
    Ok(*store.get()?.selected_country())
}

/// Selects a country by ISO code.
///
/// ## Errors
/// `VALIDATION_ERROR` for a code not in the list; the selection is unchanged.
pub fn select_country(store: &StoreHandle, code: &str) -> Result<Country, ApiError> {
    debug!(country = %code, "select_country command");

    let store = store.get()?;
    let country = require_country(code)?;
    store.set_selected_country(country);

    Ok(*country)
}
