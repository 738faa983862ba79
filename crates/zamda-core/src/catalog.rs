//! # Static Catalog
//!
//! Build-time constant data the store and screens read but never mutate:
//! the country list, the product catalog, service categories and the sample
//! order history.
//!
//! ## Country Selection Contract
//! The store always has a selected country. It starts at [`default_country`]
//! (the first list entry, Nigeria +234) and can only ever be replaced by
//! another `&'static` entry from [`COUNTRIES`].

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Country, Order, OrderStatus, Product};

// =============================================================================
// Countries
// =============================================================================

const fn country(
    code: &'static str,
    name: &'static str,
    dial_code: &'static str,
    flag: &'static str,
) -> Country {
    Country {
        code,
        name,
        dial_code,
        flag,
    }
}

/// Supported countries, in picker order. The first entry is the default.
pub static COUNTRIES: [Country; 20] = [
    country("NG", "Nigeria", "+234", "🇳🇬"),
    country("GH", "Ghana", "+233", "🇬🇭"),
    country("KE", "Kenya", "+254", "🇰🇪"),
    country("ZA", "South Africa", "+27", "🇿🇦"),
    country("EG", "Egypt", "+20", "🇪🇬"),
    country("TZ", "Tanzania", "+255", "🇹🇿"),
    country("UG", "Uganda", "+256", "🇺🇬"),
    country("ET", "Ethiopia", "+251", "🇪🇹"),
    country("RW", "Rwanda", "+250", "🇷🇼"),
    country("SN", "Senegal", "+221", "🇸🇳"),
    country("CI", "Ivory Coast", "+225", "🇨🇮"),
    country("CM", "Cameroon", "+237", "🇨🇲"),
    country("MA", "Morocco", "+212", "🇲🇦"),
    country("DZ", "Algeria", "+213", "🇩🇿"),
    country("TN", "Tunisia", "+216", "🇹🇳"),
    country("ZW", "Zimbabwe", "+263", "🇿🇼"),
    country("BW", "Botswana", "+267", "🇧🇼"),
    country("NA", "Namibia", "+264", "🇳🇦"),
    country("MZ", "Mozambique", "+258", "🇲🇿"),
    country("AO", "Angola", "+244", "🇦🇴"),
];

/// The country a fresh session starts with.
#[inline]
pub fn default_country() -> &'static Country {
    &COUNTRIES[0]
}

/// Looks up a country by code, ignoring ASCII case.
pub fn find_country(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Like [`find_country`] but as a typed error for command handlers.
pub fn require_country(code: &str) -> CoreResult<&'static Country> {
    find_country(code).ok_or_else(|| CoreError::UnknownCountry(code.to_string()))
}

// =============================================================================
// Catalog
// =============================================================================

/// Products, categories and order history as shipped with the client.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    orders: Vec<Order>,
}

impl Catalog {
    /// Builds a catalog from explicit data.
    pub fn new(products: Vec<Product>, categories: Vec<Category>, orders: Vec<Order>) -> Self {
        Catalog {
            products,
            categories,
            orders,
        }
    }

    /// The hard-coded catalog the client ships with.
    pub fn builtin() -> Self {
        let products = [
            ("1", "Paracetamol 500mg", 2500, "assets/para.jpg", "Pain Relief", false),
            ("2", "Vitamin C 1000mg", 4500, "assets/vitamin-c.webp", "Vitamins", true),
            ("3", "Ibuprofen 400mg", 3200, "assets/ibru.jpg", "Pain Relief", false),
            ("4", "Multivitamins", 8500, "assets/multi.webp", "Vitamins", false),
            ("5", "Cough Syrup", 3800, "assets/cough.jpg", "Cold & Flu", true),
            ("6", "Hand Sanitizer", 1500, "assets/sanitizer.webp", "Hygiene", false),
        ]
        .into_iter()
        .map(|(id, name, price, image, category, is_liked)| Product {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::from_naira(price),
            image: image.to_string(),
            category: category.to_string(),
            is_liked,
        })
        .collect();

        let categories = [
            ("1", "General", "stethoscope", "primary"),
            ("2", "Pharmacy", "pill", "secondary"),
            ("3", "Vaccines", "syringe", "success"),
            ("4", "Lab Tests", "test-tube", "warning"),
            ("5", "Mental", "brain", "accent"),
            ("6", "Orthopedic", "bone", "destructive"),
            ("7", "Optical", "eye", "primary"),
            ("8", "Pediatric", "baby", "secondary"),
        ]
        .into_iter()
        .map(|(id, name, icon, color)| Category {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
        })
        .collect();

        let orders = [
            ("ORD-001", (2024, 1, 15), OrderStatus::Delivered, 3, 12500),
            ("ORD-002", (2024, 1, 18), OrderStatus::InTransit, 2, 8200),
            ("ORD-003", (2024, 1, 20), OrderStatus::Processing, 5, 24300),
        ]
        .into_iter()
        .map(|(id, (y, m, d), status, item_count, total)| Order {
            id: id.to_string(),
            placed_on: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            status,
            item_count,
            total: Money::from_naira(total),
        })
        .collect();

        Catalog::new(products, categories, orders)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Finds a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Finds a product by id or fails with `ProductNotFound`.
    pub fn require_product(&self, id: &str) -> CoreResult<&Product> {
        self.product(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Products whose category label matches, case-insensitively.
    pub fn products_in_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| p.category.eq_ignore_ascii_case(category))
    }

    /// Products flagged as liked in the shipped data.
    pub fn liked_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_liked)
    }

    /// Finds an order by id or fails with `OrderNotFound`.
    pub fn order(&self, id: &str) -> CoreResult<&Order> {
        self.orders
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
