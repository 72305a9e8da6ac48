//! Product domain types.
//!
//! These types represent validated domain objects separate from database row
//! types. A [`Product`] always came from the store; a [`ProductInput`] is the
//! normalized output of a validated form submission.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use inventory_hub_core::{Category, ProductId};

/// A product record (domain type).
///
/// `id` and the timestamps are assigned by the store; everything else comes
/// from the form layer already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier; immutable once created.
    pub id: ProductId,
    /// Product name, trimmed and non-empty. The sole sort key.
    pub name: String,
    /// Unit price, strictly positive.
    pub price: Decimal,
    /// Units in stock.
    pub quantity: i32,
    /// One of the fixed category set.
    pub category: Category,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Inventory value of this line: price × quantity.
    #[must_use]
    pub fn line_value(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A validated, normalized product payload.
///
/// Produced by [`crate::forms::ProductForm::validate`] and consumed by the
/// repository's create and update operations; carries the full replacement
/// field set (no partial patches).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Parsed price, > 0.
    pub price: Decimal,
    /// Parsed quantity, >= 0.
    pub quantity: i32,
    /// Parsed category.
    pub category: Category,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_line_value() {
        let product = Product {
            id: ProductId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
            name: "Widget".to_owned(),
            price: Decimal::from_str("9.99").unwrap(),
            quantity: 5,
            category: Category::Electronics,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.line_value(), Decimal::from_str("49.95").unwrap());
    }
}
