//! # Dashboard
//!
//! Home tab: greeting, address, a rotating banner, categories and the
//! product grid with like toggles and quick add.
//!
//! Likes are per-view: seeded from the catalog on mount and forgotten when
//! the view goes away. They never touch the store.

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use zamda_core::{Catalog, Product};

use crate::commands::cart::{self, CartResponse};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::navigation::{Navigator, Route};
use crate::state::StoreHandle;
use crate::timer::ScopedTimer;

/// Shown until the user has an address on file.
pub const DEFAULT_ADDRESS: &str = "123 Health Street, Lagos";

const FALLBACK_NAME: &str = "User";

/// `(title, subtitle)` for each promo banner.
pub const BANNER_SLIDES: [(&str, &str); 3] = [
    ("Your Health Matters", "Book an appointment today"),
    ("24/7 Care Available", "Telemedicine consultations"),
    ("Save Up to 30%", "On prescription medications"),
];

const BANNER_PERIOD: Duration = Duration::from_secs(4);

/// Counts above this show as `9+` on the cart badge.
const BADGE_LIMIT: i64 = 9;

/// Text for the cart badge, or `None` when the cart is empty.
pub fn badge_label(count: i64) -> Option<String> {
    match count {
        c if c <= 0 => None,
        c if c > BADGE_LIMIT => Some(format!("{}+", BADGE_LIMIT)),
        c => Some(c.to_string()),
    }
}

#[derive(Debug)]
pub struct DashboardView {
    store: StoreHandle,
    catalog: Arc<Catalog>,
    config: Arc<AppConfig>,
    liked: HashMap<String, bool>,
    slide: Arc<AtomicUsize>,
    _carousel: ScopedTimer,
}

impl DashboardView {
    /// Opens the dashboard.
    ///
    /// ## Errors
    /// `UNAUTHENTICATED` when nobody is signed in; navigation is reset to
    /// the splash screen first.
    pub fn mount(
        store: StoreHandle,
        navigator: &Navigator,
        catalog: Arc<Catalog>,
        config: Arc<AppConfig>,
    ) -> Result<Self, ApiError> {
        if !store.get()?.is_authenticated() {
            navigator.navigate_guarded(Route::Dashboard, false);
            return Err(ApiError::unauthenticated("Dashboard"));
        }

        let liked = catalog
            .products()
            .iter()
            .map(|p| (p.id.clone(), p.is_liked))
            .collect();

        let slide = Arc::new(AtomicUsize::new(0));
        let ticker = slide.clone();
        let carousel = ScopedTimer::every("dashboard.carousel", BANNER_PERIOD, move || {
            let next = (ticker.load(Ordering::SeqCst) + 1) % BANNER_SLIDES.len();
            ticker.store(next, Ordering::SeqCst);
            ControlFlow::Continue(())
        })?;

        Ok(DashboardView {
            store,
            catalog,
            config,
            liked,
            slide,
            _carousel: carousel,
        })
    }

    /// First name, or "User".
    pub fn greeting_name(&self) -> Result<String, ApiError> {
        let user = self.store.get()?.user();
        Ok(user
            .map(|u| u.first_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| FALLBACK_NAME.to_string()))
    }

    /// Avatar letter, or 'U'.
    pub fn initial(&self) -> Result<char, ApiError> {
        Ok(self.store.get()?.user().map_or('U', |u| u.initial()))
    }

    pub fn address(&self) -> Result<String, ApiError> {
        let user = self.store.get()?.user();
        Ok(user
            .and_then(|u| u.address)
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string()))
    }

    pub fn current_slide(&self) -> usize {
        self.slide.load(Ordering::SeqCst)
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn is_liked(&self, product_id: &str) -> bool {
        self.liked.get(product_id).copied().unwrap_or(false)
    }

    /// Flips the heart on a product. Returns the new state.
    pub fn toggle_like(&mut self, product_id: &str) -> bool {
        let liked = self.liked.entry(product_id.to_string()).or_insert(false);
        *liked = !*liked;
        *liked
    }

    /// Price as shown on a product card.
    pub fn price_label(&self, product: &Product) -> String {
        self.config.format_currency(product.price)
    }

    /// The "+" button on a product card.
    pub fn add_to_cart(&self, product_id: &str) -> Result<CartResponse, ApiError> {
        cart::add_to_cart(&self.store, &self.catalog, &self.config, product_id)
    }

    /// Total units in the cart.
    pub fn cart_count(&self) -> Result<i64, ApiError> {
        Ok(self.store.get()?.cart_count())
    }

    /// Badge on the cart icon.
    pub fn cart_badge(&self) -> Result<Option<String>, ApiError> {
        Ok(badge_label(self.cart_count()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::AppStore;
    use tokio::time::sleep;
    use zamda_core::{User, MAX_ITEM_QUANTITY};

    fn mount_signed_in(user: User) -> (Arc<AppStore>, Arc<Navigator>, DashboardView) {
        let store = Arc::new(AppStore::new());
        store.sign_in(user);
        let navigator = Arc::new(Navigator::new(Route::Dashboard));
        let view = DashboardView::mount(
            store.handle(),
            &navigator,
            Arc::new(Catalog::builtin()),
            Arc::new(AppConfig::default()),
        )
        .unwrap();
        (store, navigator, view)
    }

    #[tokio::test]
    async fn test_redirects_when_signed_out() {
        let store = Arc::new(AppStore::new());
        let navigator = Navigator::new(Route::Otp { from_login: true });

        let err = DashboardView::mount(
            store.handle(),
            &navigator,
            Arc::new(Catalog::builtin()),
            Arc::new(AppConfig::default()),
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::Unauthenticated);
        assert_eq!(navigator.current(), Route::Splash);
    }

    #[tokio::test]
    async fn test_greeting_and_fallbacks() {
        let (_store, _, view) = mount_signed_in(User::new("Ada", "Obi", "+2348012345678"));
        assert_eq!(view.greeting_name().unwrap(), "Ada");
        assert_eq!(view.initial().unwrap(), 'A');
        assert_eq!(view.address().unwrap(), DEFAULT_ADDRESS);

        let (_store, _, view) = mount_signed_in(User::new("", "", "+2348012345678"));
        assert_eq!(view.greeting_name().unwrap(), "User");
        assert_eq!(view.initial().unwrap(), 'U');
    }

    #[tokio::test]
    async fn test_likes_are_view_local() {
        let (store, _, mut view) = mount_signed_in(User::new("Ada", "Obi", "+234"));

        assert!(view.is_liked("2"));
        assert!(!view.is_liked("1"));

        assert!(view.toggle_like("1"));
        assert!(!view.toggle_like("2"));
        assert!(view.is_liked("1"));

        // shipped data and session are untouched
        assert!(!view.products()[0].is_liked);
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_add_to_cart_updates_badge() {
        let (_store, _, view) = mount_signed_in(User::new("Ada", "Obi", "+234"));

        view.add_to_cart("5").unwrap();
        view.add_to_cart("5").unwrap();

        assert_eq!(view.cart_count().unwrap(), 2);
        assert_eq!(view.cart_badge().unwrap().as_deref(), Some("2"));
        assert_eq!(view.price_label(&view.products()[4]), "₦3,800");
    }

    #[test]
    fn test_badge_label() {
        assert_eq!(badge_label(0), None);
        assert_eq!(badge_label(1).as_deref(), Some("1"));
        assert_eq!(badge_label(9).as_deref(), Some("9"));
        assert_eq!(badge_label(10).as_deref(), Some("9+"));
        assert_eq!(badge_label(i64::MAX).as_deref(), Some("9+"));
    }

    #[tokio::test]
    async fn test_quick_add_stops_at_max_quantity() {
        let (store, _, view) = mount_signed_in(User::new("Ada", "Obi", "+234"));
        view.add_to_cart("5").unwrap();
        store.update_cart_quantity("5", MAX_ITEM_QUANTITY);

        let err = view.add_to_cart("5").unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(view.cart_count().unwrap(), MAX_ITEM_QUANTITY);
        assert_eq!(view.cart_badge().unwrap().as_deref(), Some("9+"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_banner_rotates() {
        let (_store, _, view) = mount_signed_in(User::new("Ada", "Obi", "+234"));
        assert_eq!(view.current_slide(), 0);

        sleep(Duration::from_millis(4_100)).await;
        assert_eq!(view.current_slide(), 1);

        sleep(Duration::from_secs(8)).await;
        assert_eq!(view.current_slide(), 0);
    }
}
