//! # Screen Flows
//!
//! The screens' behavior without the pixels. Each flow is built with the
//! collaborators it needs (a `StoreHandle`, the `Navigator`, sometimes the
//! config or an `OtpVerifier`) and owns any timers it starts, so dropping a
//! flow is the same as unmounting the screen.
//!
//! ```text
//! flows/
//! ├── splash.rs     ◄─── reveal + auto-advance timers
//! ├── phone.rs      ◄─── country picker, digit capture
//! ├── otp.rs        ◄─── six slots, resend countdown, verification
//! ├── register.rs   ◄─── sign-up form, agreements, Google demo
//! ├── login.rs      ◄─── phone + password, then OTP
//! ├── account.rs    ◄─── profile rows, logout
//! └── dashboard.rs  ◄─── greeting, liked toggles, quick add
//! ```

mod account;
mod dashboard;
mod login;
mod otp;
mod phone;
mod register;
mod splash;

pub use account::{AccountView, ProfileRow, NOT_SET};
pub use dashboard::{badge_label, DashboardView, BANNER_SLIDES, DEFAULT_ADDRESS};
pub use login::{LoginFlow, LoginForm};
pub use otp::OtpFlow;
pub use phone::PhoneEntryFlow;
pub use register::{Agreements, RegisterFlow, RegistrationForm};
pub use splash::SplashFlow;
