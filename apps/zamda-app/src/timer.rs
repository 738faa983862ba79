//! # Scoped Timers
//!
//! Delayed and repeating callbacks owned by a screen. The timer is a spawned
//! tokio task; dropping the `ScopedTimer` aborts it, so a callback can never
//! run against a screen that has already gone away.
//!
//! ```text
//! SplashFlow ──owns──► ScopedTimer("splash.advance") ──► tokio task
//!     │                                                     │
//!     └── dropped ──► Drop::drop ──► JoinHandle::abort ─────┘
//! ```

use std::ops::ControlFlow;
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("Timers need a running tokio runtime")]
    NoRuntime,
}

/// A timer that lives exactly as long as its owner.
#[derive(Debug)]
pub struct ScopedTimer {
    label: &'static str,
    task: JoinHandle<()>,
}

impl ScopedTimer {
    /// Runs `f` once after `delay`.
    pub fn after<F>(label: &'static str, delay: Duration, f: F) -> Result<Self, TimerError>
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        let task = runtime.spawn(async move {
            sleep(delay).await;
            trace!(timer = label, "fired");
            f();
        });
        Ok(ScopedTimer { label, task })
    }

    /// Runs `f` every `period`, first after one full period, until it
    /// returns `ControlFlow::Break`.
    pub fn every<F>(label: &'static str, period: Duration, mut f: F) -> Result<Self, TimerError>
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        let task = runtime.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                trace!(timer = label, "tick");
                if f().is_break() {
                    break;
                }
            }
        });
        Ok(ScopedTimer { label, task })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Stops the timer. Safe to call after it already fired.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the callback has run to completion (or the timer was cancelled).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_after_fires_once() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let timer = ScopedTimer::after("test", Duration::from_millis(500), move || {
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap();

        sleep(Duration::from_millis(499)).await;
        assert!(!fired.load(Ordering::SeqCst));

        sleep(Duration::from_millis(2)).await;
        assert!(fired.load(Ordering::SeqCst));
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let timer = ScopedTimer::after("test", Duration::from_millis(100), move || {
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap();
        drop(timer);

        sleep(Duration::from_millis(500)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_until_break() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();

        let timer = ScopedTimer::every("test", Duration::from_secs(1), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            if n == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

        sleep(Duration::from_millis(1500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_repeating() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();

        let timer = ScopedTimer::every("test", Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        })
        .unwrap();

        sleep(Duration::from_millis(2500)).await;
        timer.cancel();
        sleep(Duration::from_secs(5)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_requires_runtime() {
        let err = ScopedTimer::after("test", Duration::from_secs(1), || {}).unwrap_err();
        assert_eq!(err, TimerError::NoRuntime);
    }
}
