//! # Zamda Headless Session
//!
//! Drives one session through splash, phone entry and code entry from the
//! terminal, logging every store and navigation change. Useful for checking
//! a config file or an OTP policy without a front end attached.
//!
//! ```text
//! $ ZAMDA_SPLASH_ADVANCE_MS=1000 RUST_LOG=debug zamda-app 8012345678 123456
//! ```

use std::process::ExitCode;

use tracing::{error, info};
use zamda_app::config::AppConfig;
use zamda_app::navigation::Route;
use zamda_app::{init_tracing, AppRoot};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let phone = args.next().unwrap_or_else(|| "8012345678".to_string());
    let code = args.next().unwrap_or_else(|| "123456".to_string());

    let mut root = AppRoot::launch(AppConfig::load_or_default(None));

    let result = run(&root, &phone, &code).await;
    root.shutdown();

    match result {
        Ok(route) => {
            info!(%route, "Session finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(root: &AppRoot, phone: &str, code: &str) -> Result<Route, zamda_app::error::ApiError> {
    let mut nav = root.navigator().subscribe();
    let splash = root.splash()?;

    while nav.borrow_and_update().current == Route::Splash {
        if nav.changed().await.is_err() {
            break;
        }
    }
    drop(splash);

    let entry = root.phone_entry();
    entry.input(phone)?;
    entry.submit()?;

    let mut otp = root.otp(false)?;
    otp.paste(code);
    otp.verify()
}
