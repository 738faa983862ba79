//! # Zamda App Library
//!
//! Session layer of the Zamda healthcare shopping client: the Session & Cart
//! Store, the screens' behavior, navigation and configuration. Rendering is
//! somebody else's job; everything here is headless and testable.
//!
//! ## Module Organization
//! ```text
//! zamda_app/
//! ├── lib.rs          ◄─── You are here (AppRoot, tracing setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── store.rs    ◄─── AppStore, AppState, StoreHandle
//! ├── commands/       ◄─── View → store contract (cart, session, locale, catalog)
//! ├── flows/          ◄─── Splash, phone, OTP, register, login, account, dashboard
//! ├── navigation.rs   ◄─── Routes, back stack, auth guard
//! ├── timer.rs        ◄─── ScopedTimer (cancel on drop)
//! ├── otp.rs          ◄─── OtpVerifier seam
//! ├── config.rs       ◄─── AppConfig (defaults → TOML → env)
//! └── error.rs        ◄─── ApiError for commands and flows
//! ```
//!
//! ## Session Lifetime
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  AppRoot::launch(config)                                                │
//! │     │  one AppStore, one Navigator (at "/"), one OtpVerifier            │
//! │     ▼                                                                   │
//! │  root.phone_entry() / root.otp(..) / root.dashboard() ...               │
//! │     │  each flow gets a StoreHandle, never the store itself             │
//! │     ▼                                                                   │
//! │  root.shutdown()                                                        │
//! │     │  store dropped                                                    │
//! │     ▼                                                                   │
//! │  any leftover handle.get() ──► StoreError::NotInitialized               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod flows;
pub mod navigation;
pub mod otp;
pub mod state;
pub mod timer;

use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use zamda_core::Catalog;

use config::AppConfig;
use error::ApiError;
use flows::{
    AccountView, DashboardView, LoginFlow, OtpFlow, PhoneEntryFlow, RegisterFlow, SplashFlow,
};
use navigation::{Navigator, Route};
use otp::{verifier_from_config, OtpVerifier};
use state::{AppStore, StoreHandle};

/// One application session.
///
/// The only strong owner of the store. Screens are built through it so they
/// receive handles instead of reaching for a global.
#[derive(Debug)]
pub struct AppRoot {
    session_id: Uuid,
    config: Arc<AppConfig>,
    catalog: Arc<Catalog>,
    store: Option<Arc<AppStore>>,
    navigator: Arc<Navigator>,
    verifier: Arc<dyn OtpVerifier>,
}

impl AppRoot {
    /// Starts a session with the verifier the config selects.
    pub fn launch(config: AppConfig) -> Self {
        let verifier = verifier_from_config(&config);
        Self::launch_with_verifier(config, verifier)
    }

    /// Starts a session with an explicit verifier.
    pub fn launch_with_verifier(config: AppConfig, verifier: Arc<dyn OtpVerifier>) -> Self {
        let session_id = Uuid::new_v4();
        info!(%session_id, otp_policy = %config.otp.policy, "Launching Zamda session");

        AppRoot {
            session_id,
            config: Arc::new(config),
            catalog: Arc::new(Catalog::builtin()),
            store: Some(Arc::new(AppStore::new())),
            navigator: Arc::new(Navigator::new(Route::Splash)),
            verifier,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &Arc<AppConfig> {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    pub fn is_running(&self) -> bool {
        self.store.is_some()
    }

    /// A handle for injection. Detached once the session has shut down.
    pub fn store_handle(&self) -> StoreHandle {
        match &self.store {
            Some(store) => store.handle(),
            None => StoreHandle::detached(),
        }
    }

    /// Disposes the store. Every outstanding handle starts failing.
    pub fn shutdown(&mut self) {
        if self.store.take().is_some() {
            info!(session_id = %self.session_id, "Zamda session shut down");
        }
    }

    /// Navigates, bouncing to the splash screen if `route` needs a session.
    pub fn open(&self, route: Route) -> Result<Route, ApiError> {
        let authenticated = self.store_handle().get()?.is_authenticated();
        Ok(self.navigator.navigate_guarded(route, authenticated))
    }

    // =========================================================================
    // Screens
    // =========================================================================

    pub fn splash(&self) -> Result<SplashFlow, ApiError> {
        SplashFlow::mount(&self.config, self.navigator.clone())
    }

    pub fn phone_entry(&self) -> PhoneEntryFlow {
        PhoneEntryFlow::new(self.store_handle(), self.navigator.clone())
    }

    pub fn otp(&self, from_login: bool) -> Result<OtpFlow, ApiError> {
        OtpFlow::mount(
            self.store_handle(),
            self.navigator.clone(),
            self.verifier.clone(),
            &self.config,
            from_login,
        )
    }

    pub fn register(&self) -> RegisterFlow {
        RegisterFlow::new(self.store_handle(), self.navigator.clone())
    }

    pub fn login(&self) -> LoginFlow {
        LoginFlow::new(self.store_handle(), self.navigator.clone())
    }

    pub fn account(&self) -> AccountView {
        AccountView::new(self.store_handle(), self.navigator.clone())
    }

    pub fn dashboard(&self) -> Result<DashboardView, ApiError> {
        DashboardView::mount(
            self.store_handle(),
            &self.navigator,
            self.catalog.clone(),
            self.config.clone(),
        )
    }
}

/// Installs the global tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages everywhere
/// - `RUST_LOG=zamda_app=trace` - Include timer ticks
/// - Default: INFO, DEBUG for this crate
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,zamda_app=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .try_init();
}
