//! List view derivations.
//!
//! Pure functions over the canonical product list: the search filter and the
//! dashboard statistics. Stats are always computed from the unfiltered list;
//! only the table rows respect the search term.

use rust_decimal::Decimal;

use crate::models::Product;

/// Quantity below which a product counts as low stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Aggregate statistics over the full (unfiltered) product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryStats {
    /// Total number of products.
    pub total_products: usize,
    /// Products with quantity below [`LOW_STOCK_THRESHOLD`].
    pub low_stock: usize,
    /// Sum of price × quantity across all products.
    pub total_value: Decimal,
}

impl InventoryStats {
    /// Compute the stat cards from the canonical list.
    #[must_use]
    pub fn compute(products: &[Product]) -> Self {
        Self {
            total_products: products.len(),
            low_stock: products
                .iter()
                .filter(|p| p.quantity < LOW_STOCK_THRESHOLD)
                .count(),
            total_value: products.iter().map(Product::line_value).sum(),
        }
    }
}

/// Filter products whose name or category contains the search term,
/// case-insensitively. An empty term returns the full list.
#[must_use]
pub fn filter_products(products: &[Product], term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.category.as_str().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use chrono::Utc;
    use inventory_hub_core::{Category, ProductId};

    fn product(name: &str, price: &str, quantity: i32, category: Category) -> Product {
        Product {
            id: ProductId::new(uuid::Uuid::new_v4()),
            name: name.to_owned(),
            price: Decimal::from_str(price).unwrap(),
            quantity,
            category,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("Headphones", "49.99", 12, Category::Electronics),
            product("Milk", "1.50", 3, Category::Grocery),
            product("T-Shirt", "15.00", 9, Category::Clothing),
        ]
    }

    #[test]
    fn test_stats() {
        let stats = InventoryStats::compute(&sample());
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.low_stock, 2);
        // 49.99*12 + 1.50*3 + 15.00*9 = 599.88 + 4.50 + 135.00
        assert_eq!(stats.total_value, Decimal::from_str("739.38").unwrap());
    }

    #[test]
    fn test_stats_empty_list() {
        let stats = InventoryStats::compute(&[]);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.low_stock, 0);
        assert_eq!(stats.total_value, Decimal::ZERO);
    }

    #[test]
    fn test_low_stock_threshold_is_exclusive() {
        let products = vec![
            product("At threshold", "1.00", 10, Category::Grocery),
            product("Below threshold", "1.00", 9, Category::Grocery),
        ];
        assert_eq!(InventoryStats::compute(&products).low_stock, 1);
    }

    #[test]
    fn test_filter_matches_name_case_insensitively() {
        let filtered = filter_products(&sample(), "HEAD");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().unwrap().name, "Headphones");
    }

    #[test]
    fn test_filter_matches_category() {
        let filtered = filter_products(&sample(), "grocery");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().unwrap().name, "Milk");
    }

    #[test]
    fn test_filter_or_semantics() {
        // "t" hits "T-Shirt" by name and "Electronics" by category
        let filtered = filter_products(&sample(), "t");
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_empty_term_returns_full_list() {
        assert_eq!(filter_products(&sample(), "").len(), 3);
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(filter_products(&sample(), "xyzzy").is_empty());
    }
}
