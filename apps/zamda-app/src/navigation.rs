//! # Navigation
//!
//! Headless router: the current screen plus a back stack, observable through
//! a `watch` channel the same way the store is.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   /  (splash) ──5s──► /auth/phone ──► /auth/otp ──┬──► /auth/register  │
//! │                            ▲                      │         │           │
//! │                            │                      │ login   ▼           │
//! │   /auth/login ─────────────┼──► /auth/otp ────────┴──► /dashboard      │
//! │                                                                         │
//! │   Bottom tabs (signed-in only):                                         │
//! │   /dashboard   /orders   /account   /settings   /cart                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use tokio::sync::watch;
use tracing::{debug, warn};

// =============================================================================
// Routes
// =============================================================================

/// Every screen the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Splash,
    PhoneInput,
    /// Code entry. `from_login` decides where a verified code leads.
    Otp { from_login: bool },
    Register,
    Login,
    Dashboard,
    Orders,
    Account,
    Settings,
    Cart,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Splash => "/",
            Route::PhoneInput => "/auth/phone",
            Route::Otp { .. } => "/auth/otp",
            Route::Register => "/auth/register",
            Route::Login => "/auth/login",
            Route::Dashboard => "/dashboard",
            Route::Orders => "/orders",
            Route::Account => "/account",
            Route::Settings => "/settings",
            Route::Cart => "/cart",
        }
    }

    /// Resolves a path. Unknown paths are `None` (the not-found page).
    ///
    /// `/auth/otp` resolves to the registration variant; the login variant is
    /// only reachable by navigating with `from_login: true`.
    pub fn from_path(path: &str) -> Option<Route> {
        let route = match path {
            "/" => Route::Splash,
            "/auth/phone" => Route::PhoneInput,
            "/auth/otp" => Route::Otp { from_login: false },
            "/auth/register" => Route::Register,
            "/auth/login" => Route::Login,
            "/dashboard" => Route::Dashboard,
            "/orders" => Route::Orders,
            "/account" => Route::Account,
            "/settings" => Route::Settings,
            "/cart" => Route::Cart,
            _ => return None,
        };
        Some(route)
    }

    /// Bottom-tab screens need a signed-in session.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::Orders | Route::Account | Route::Settings | Route::Cart
        )
    }

    /// Bottom navigation entries in display order.
    pub fn tabs() -> [(Route, &'static str); 5] {
        [
            (Route::Dashboard, "Home"),
            (Route::Orders, "Orders"),
            (Route::Account, "Account"),
            (Route::Settings, "Settings"),
            (Route::Cart, "Cart"),
        ]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// =============================================================================
// Navigator
// =============================================================================

/// Current route plus everything that can be popped back to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavState {
    pub current: Route,
    pub history: Vec<Route>,
}

#[derive(Debug)]
pub struct Navigator {
    state: watch::Sender<NavState>,
}

impl Navigator {
    /// Starts at `initial` with an empty back stack.
    pub fn new(initial: Route) -> Self {
        let (state, _) = watch::channel(NavState {
            current: initial,
            history: Vec::new(),
        });
        Navigator { state }
    }

    pub fn current(&self) -> Route {
        self.state.borrow().current
    }

    pub fn can_go_back(&self) -> bool {
        !self.state.borrow().history.is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<NavState> {
        self.state.subscribe()
    }

    /// Pushes `route`, keeping the current one on the back stack.
    pub fn navigate(&self, route: Route) {
        debug!(to = %route, "navigate");
        self.state.send_modify(|s| {
            let previous = std::mem::replace(&mut s.current, route);
            s.history.push(previous);
        });
    }

    /// Swaps the current route without touching the back stack.
    pub fn replace(&self, route: Route) {
        debug!(to = %route, "replace");
        self.state.send_modify(|s| s.current = route);
    }

    /// Pops the back stack. Returns `false` (and does nothing) at the root.
    pub fn back(&self) -> bool {
        self.state.send_if_modified(|s| match s.history.pop() {
            Some(previous) => {
                debug!(to = %previous, "back");
                s.current = previous;
                true
            }
            None => false,
        })
    }

    /// Drops the whole back stack and lands on `route`.
    pub fn reset_to(&self, route: Route) {
        debug!(to = %route, "reset_to");
        self.state.send_modify(|s| {
            s.history.clear();
            s.current = route;
        });
    }

    /// Navigates unless `route` needs a session the caller does not have,
    /// in which case the stack is reset to the splash screen.
    ///
    /// Returns the route actually landed on.
    pub fn navigate_guarded(&self, route: Route, is_authenticated: bool) -> Route {
        if route.requires_auth() && !is_authenticated {
            warn!(requested = %route, "Unauthenticated access, redirecting to splash");
            self.reset_to(Route::Splash);
            return Route::Splash;
        }
        self.navigate(route);
        route
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Splash)
    }
}
