//! # OTP Flow
//!
//! Six single-digit slots, a resend countdown and the hand-off to either
//! the dashboard (login) or registration (new account).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ 4 ][ 2 ][ 4 ][ _ ][ _ ][ _ ]      Resend code in 0:42               │
//! │                    ▲                                                    │
//! │                    focus                                                │
//! │                                                                         │
//! │  verify() ──► OtpVerifier ──┬── from login ──► authenticated, /dashboard│
//! │                             └── new user ───► /auth/register            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use zamda_core::validation::compose_full_phone;
use zamda_core::OTP_LENGTH;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::navigation::{Navigator, Route};
use crate::otp::OtpVerifier;
use crate::state::StoreHandle;
use crate::timer::{ScopedTimer, TimerError};

#[derive(Debug)]
pub struct OtpFlow {
    store: StoreHandle,
    navigator: Arc<Navigator>,
    verifier: Arc<dyn OtpVerifier>,
    from_login: bool,
    slots: [Option<char>; OTP_LENGTH],
    resend_secs: u64,
    remaining: Arc<AtomicU64>,
    countdown: Option<ScopedTimer>,
}

impl OtpFlow {
    /// Opens the screen and starts the resend countdown.
    pub fn mount(
        store: StoreHandle,
        navigator: Arc<Navigator>,
        verifier: Arc<dyn OtpVerifier>,
        config: &AppConfig,
        from_login: bool,
    ) -> Result<Self, ApiError> {
        let mut flow = OtpFlow {
            store,
            navigator,
            verifier,
            from_login,
            slots: [None; OTP_LENGTH],
            resend_secs: config.otp_resend_secs(),
            remaining: Arc::new(AtomicU64::new(0)),
            countdown: None,
        };
        flow.start_countdown()?;
        Ok(flow)
    }

    fn start_countdown(&mut self) -> Result<(), TimerError> {
        // drop the old timer before resetting the counter it writes to
        self.countdown = None;
        self.remaining.store(self.resend_secs, Ordering::SeqCst);

        let remaining = self.remaining.clone();
        let timer = ScopedTimer::every("otp.countdown", Duration::from_secs(1), move || {
            let left = remaining.load(Ordering::SeqCst).saturating_sub(1);
            remaining.store(left, Ordering::SeqCst);
            if left == 0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        self.countdown = Some(timer);
        Ok(())
    }

    // =========================================================================
    // Slot Editing
    // =========================================================================

    /// Handles a change in slot `index`.
    ///
    /// Input that is not all digits is ignored. Otherwise the last character
    /// wins (empty input clears the slot). Returns the slot that should take
    /// focus next, if focus moves.
    pub fn enter_digit(&mut self, index: usize, input: &str) -> Option<usize> {
        if index >= OTP_LENGTH || !input.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let digit = input.chars().last();
        self.slots[index] = digit;

        if digit.is_some() && index < OTP_LENGTH - 1 {
            Some(index + 1)
        } else {
            None
        }
    }

    /// Backspace in slot `index`: clears a filled slot, or steps back from an
    /// empty one. Returns where focus ends up.
    pub fn backspace(&mut self, index: usize) -> usize {
        let index = index.min(OTP_LENGTH - 1);
        if self.slots[index].is_some() {
            self.slots[index] = None;
            index
        } else {
            index.saturating_sub(1)
        }
    }

    /// Fills slots from the start with the first six digits of `text`.
    /// Slots past the pasted digits keep their value. Returns the focus slot.
    pub fn paste(&mut self, text: &str) -> usize {
        let digits: Vec<char> = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(OTP_LENGTH)
            .collect();

        for (slot, digit) in self.slots.iter_mut().zip(&digits) {
            *slot = Some(*digit);
        }

        digits.len().min(OTP_LENGTH - 1)
    }

    pub fn slots(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.slots
    }

    /// The digits entered so far, in slot order, skipping gaps.
    pub fn code(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// All six slots filled; "Verify" is enabled.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    // =========================================================================
    // Resend
    // =========================================================================

    pub fn seconds_remaining(&self) -> u64 {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn can_resend(&self) -> bool {
        self.seconds_remaining() == 0
    }

    /// Restarts the countdown and clears every slot.
    pub fn resend(&mut self) -> Result<(), ApiError> {
        if !self.can_resend() {
            return Err(ApiError::validation(format!(
                "Resend is available in {} seconds",
                self.seconds_remaining()
            )));
        }

        debug!("Resending verification code");
        self.slots = [None; OTP_LENGTH];
        self.start_countdown()?;
        Ok(())
    }

    // =========================================================================
    // Verify
    // =========================================================================

    /// Checks the entered code and moves on.
    ///
    /// ## Outcomes
    /// - Came from login: session becomes authenticated, go to `/dashboard`
    /// - New user: go to `/auth/register` (authentication happens there)
    pub fn verify(&self) -> Result<Route, ApiError> {
        if !self.is_complete() {
            return Err(ApiError::validation(format!(
                "Enter all {} digits of the code",
                OTP_LENGTH
            )));
        }

        let store = self.store.get()?;
        let phone = store.with_state(|s| compose_full_phone(s.selected_country, &s.phone_number));

        if let Err(e) = self.verifier.verify(&phone, &self.code()) {
            warn!(error = %e, "Verification failed");
            return Err(e.into());
        }

        let route = if self.from_login {
            store.set_is_authenticated(true);
            info!("Login verified");
            Route::Dashboard
        } else {
            Route::Register
        };

        self.navigator.navigate(route);
        Ok(route)
    }
}
