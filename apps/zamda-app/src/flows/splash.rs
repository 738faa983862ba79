//! Splash screen: reveal the logo, then move on to phone entry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::navigation::{Navigator, Route};
use crate::timer::ScopedTimer;

/// Owns both splash timers. Dropping it before they fire cancels them.
#[derive(Debug)]
pub struct SplashFlow {
    revealed: Arc<AtomicBool>,
    _reveal: ScopedTimer,
    _advance: ScopedTimer,
}

impl SplashFlow {
    /// Starts the reveal and advance timers. Needs a tokio runtime.
    pub fn mount(config: &AppConfig, navigator: Arc<Navigator>) -> Result<Self, ApiError> {
        debug!(
            reveal_ms = config.splash.reveal_ms,
            advance_ms = config.splash.advance_ms,
            "Mounting splash"
        );

        let revealed = Arc::new(AtomicBool::new(false));

        let flag = revealed.clone();
        let reveal = ScopedTimer::after("splash.reveal", config.splash_reveal(), move || {
            flag.store(true, Ordering::SeqCst);
        })?;

        let advance = ScopedTimer::after("splash.advance", config.splash_advance(), move || {
            navigator.navigate(Route::PhoneInput);
        })?;

        Ok(SplashFlow {
            revealed,
            _reveal: reveal,
            _advance: advance,
        })
    }

    /// Whether the logo and tagline are showing yet.
    pub fn is_revealed(&self) -> bool {
        self.revealed.load(Ordering::SeqCst)
    }
}
