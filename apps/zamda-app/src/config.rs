//! # App Configuration
//!
//! Tunables for the session layer: currency display, delivery fee, splash
//! timing and the one-time code policy.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ZAMDA_DELIVERY_FEE=2000                                            │
//! │     ZAMDA_OTP_POLICY=fixed  ZAMDA_OTP_CODE=424242                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/zamda/app.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.zamda.zamda/app.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ₦, 1500 delivery, 500ms / 5000ms splash, demo OTP, 60s resend      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # app.toml
//! currency_symbol = "₦"
//! delivery_fee = 1500
//!
//! [splash]
//! reveal_ms = 500
//! advance_ms = 5000
//!
//! [otp]
//! policy = "fixed"   # demo | fixed
//! code = "424242"
//! resend_secs = 60
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use zamda_core::money::NAIRA_SYMBOL;
use zamda_core::validation::validate_otp_code;
use zamda_core::{Money, DEFAULT_DELIVERY_FEE};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// OTP Policy
// =============================================================================

/// How entered one-time codes are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpPolicy {
    /// Any well-formed code passes. Demo builds only.
    #[default]
    Demo,

    /// Exactly the configured `otp.code` passes.
    Fixed,
}

impl std::fmt::Display for OtpPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OtpPolicy::Demo => write!(f, "demo"),
            OtpPolicy::Fixed => write!(f, "fixed"),
        }
    }
}

impl std::str::FromStr for OtpPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "demo" => Ok(OtpPolicy::Demo),
            "fixed" => Ok(OtpPolicy::Fixed),
            other => Err(ConfigError::Invalid(format!(
                "Unknown OTP policy: '{}'. Valid options: demo, fixed",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Splash screen timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplashSettings {
    /// Delay before the logo and tagline appear.
    #[serde(default = "default_reveal_ms")]
    pub reveal_ms: u64,

    /// Delay before moving on to phone entry.
    #[serde(default = "default_advance_ms")]
    pub advance_ms: u64,
}

fn default_reveal_ms() -> u64 {
    500
}

fn default_advance_ms() -> u64 {
    5000
}

impl Default for SplashSettings {
    fn default() -> Self {
        SplashSettings {
            reveal_ms: default_reveal_ms(),
            advance_ms: default_advance_ms(),
        }
    }
}

/// One-time code settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpSettings {
    #[serde(default)]
    pub policy: OtpPolicy,

    /// Required when `policy = "fixed"`.
    #[serde(default)]
    pub code: Option<String>,

    /// Countdown before "Resend code" unlocks.
    #[serde(default = "default_resend_secs")]
    pub resend_secs: u64,
}

fn default_resend_secs() -> u64 {
    60
}

impl Default for OtpSettings {
    fn default() -> Self {
        OtpSettings {
            policy: OtpPolicy::default(),
            code: None,
            resend_secs: default_resend_secs(),
        }
    }
}

fn default_currency_symbol() -> String {
    NAIRA_SYMBOL.to_string()
}

fn default_delivery_fee() -> i64 {
    DEFAULT_DELIVERY_FEE
}

// =============================================================================
// App Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Whole naira added to a non-empty cart.
    #[serde(default = "default_delivery_fee")]
    pub delivery_fee: i64,

    #[serde(default)]
    pub splash: SplashSettings,

    #[serde(default)]
    pub otp: OtpSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency_symbol: default_currency_symbol(),
            delivery_fee: default_delivery_fee(),
            splash: SplashSettings::default(),
            otp: OtpSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (app.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading app config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load app config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.delivery_fee < 0 {
            return Err(ConfigError::Invalid(
                "delivery_fee must not be negative".into(),
            ));
        }

        if self.otp.resend_secs == 0 {
            return Err(ConfigError::Invalid(
                "otp.resend_secs must be greater than 0".into(),
            ));
        }

        if self.splash.reveal_ms >= self.splash.advance_ms {
            return Err(ConfigError::Invalid(format!(
                "splash.reveal_ms ({}) must be less than splash.advance_ms ({})",
                self.splash.reveal_ms, self.splash.advance_ms
            )));
        }

        if self.otp.policy == OtpPolicy::Fixed {
            let code = self.otp.code.as_deref().ok_or_else(|| {
                ConfigError::Invalid("otp.code is required when otp.policy = \"fixed\"".into())
            })?;
            validate_otp_code(code)
                .map_err(|e| ConfigError::Invalid(format!("otp.code: {}", e)))?;
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `ZAMDA_*` overrides read through `lookup`.
    ///
    /// Values that fail to parse are logged and ignored.
    pub(crate) fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = lookup("ZAMDA_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(fee) = lookup("ZAMDA_DELIVERY_FEE") {
            match fee.parse::<i64>() {
                Ok(f) => {
                    debug!(delivery_fee = f, "Overriding delivery fee from environment");
                    self.delivery_fee = f;
                }
                Err(_) => warn!(value = %fee, "Ignoring non-numeric ZAMDA_DELIVERY_FEE"),
            }
        }

        if let Some(secs) = lookup("ZAMDA_OTP_RESEND_SECS") {
            if let Ok(s) = secs.parse::<u64>() {
                self.otp.resend_secs = s;
            }
        }

        if let Some(policy) = lookup("ZAMDA_OTP_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding OTP policy from environment");
                    self.otp.policy = parsed;
                }
                Err(e) => warn!("{}", e),
            }
        }

        if let Some(code) = lookup("ZAMDA_OTP_CODE") {
            self.otp.code = Some(code);
        }

        if let Some(ms) = lookup("ZAMDA_SPLASH_ADVANCE_MS") {
            if let Ok(m) = ms.parse::<u64>() {
                self.splash.advance_ms = m;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "zamda", "zamda")
            .map(|dirs| dirs.config_dir().join("app.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn delivery_fee(&self) -> Money {
        Money::from_naira(self.delivery_fee)
    }

    /// Formats an amount with the configured symbol, e.g. `₦12,500`.
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }

    pub fn splash_reveal(&self) -> Duration {
        Duration::from_millis(self.splash.reveal_ms)
    }

    pub fn splash_advance(&self) -> Duration {
        Duration::from_millis(self.splash.advance_ms)
    }

    pub fn otp_resend_secs(&self) -> u64 {
        self.otp.resend_secs
    }
}
