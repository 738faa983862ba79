//! # Catalog Commands
//!
//! Read-only listings for the dashboard and orders tab.

use serde::Serialize;
use tracing::debug;
use zamda_core::{Catalog, Category, Order, OrderStatus, Product};

use crate::config::AppConfig;

/// An order row as the orders tab shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub item_count: u32,
    pub total: String,
}

impl OrderRow {
    fn from_order(order: &Order, config: &AppConfig) -> Self {
        OrderRow {
            id: order.id.clone(),
            date: order.placed_on.format("%Y-%m-%d").to_string(),
            status: order.status,
            status_label: order.status.label(),
            item_count: order.item_count,
            total: config.format_currency(order.total),
        }
    }
}

/// Lists products, optionally filtered by category label.
pub fn list_products(catalog: &Catalog, category: Option<&str>) -> Vec<Product> {
    debug!(category = ?category, "list_products command");
    match category {
        Some(label) => catalog.products_in_category(label).cloned().collect(),
        None => catalog.products().to_vec(),
    }
}

pub fn list_categories(catalog: &Catalog) -> Vec<Category> {
    catalog.categories().to_vec()
}

/// Lists the order history, newest last as shipped.
pub fn list_orders(catalog: &Catalog, config: &AppConfig) -> Vec<OrderRow> {
    debug!("list_orders command");
    catalog
        .orders()
        .iter()
        .map(|o| OrderRow::from_order(o, config))
        .collect()
}
