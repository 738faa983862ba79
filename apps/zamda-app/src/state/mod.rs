//! # State Module
//!
//! The Session & Cart Store and the handles screens use to reach it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Ownership                                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  AppRoot (one per application session)                          │   │
//! │  │    store: Option<Arc<AppStore>>   ◄── the only strong owner     │   │
//! │  └──────────────────────────┬──────────────────────────────────────┘   │
//! │                             │ handle()                                  │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ StoreHandle  │  │ StoreHandle  │  │   StoreHandle    │              │
//! │  │ (PhoneEntry) │  │ (OtpFlow)    │  │   (Dashboard)    │              │
//! │  │ Weak<..>     │  │ Weak<..>     │  │   Weak<..>       │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  After AppRoot::shutdown() every handle.get() fails with               │
//! │  StoreError::NotInitialized.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod store;

pub use store::{AppState, AppStore, StoreError, StoreHandle};
