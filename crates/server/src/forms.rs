//! Product form state and validation.
//!
//! The modal form is the only way product data enters the system. A
//! [`ProductForm`] holds the raw string field values exactly as typed; on
//! submit, [`ProductForm::validate`] either yields a normalized
//! [`ProductInput`] (trimmed name, numeric price/quantity) or a
//! [`FieldErrors`] set that the modal re-renders with. Editing a field clears
//! only that field's error.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use inventory_hub_core::Category;

use crate::models::{Product, ProductInput};

/// A single field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Name is empty after trimming.
    EmptyField,
    /// Price is not parseable as a positive number.
    InvalidPrice,
    /// Quantity is not parseable as a non-negative integer.
    InvalidQuantity,
}

impl FieldError {
    /// The message shown beneath the offending input.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyField => "Product name is required",
            Self::InvalidPrice => "Price must be greater than 0",
            Self::InvalidQuantity => "Quantity must be 0 or greater",
        }
    }
}

/// The validated form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Price,
    Quantity,
}

/// Per-field validation errors, retained until the offending field is edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<FieldError>,
    pub price: Option<FieldError>,
    pub quantity: Option<FieldError>,
}

impl FieldErrors {
    /// Whether any field failed validation.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.quantity.is_none()
    }

    /// Clear the error for one field, leaving the others untouched.
    ///
    /// Called when the user edits a field that currently carries an error.
    pub const fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name = None,
            Field::Price => self.price = None,
            Field::Quantity => self.quantity = None,
        }
    }

    /// Message for the name field, if it failed.
    #[must_use]
    pub fn name_message(&self) -> Option<&'static str> {
        self.name.map(|e| e.message())
    }

    /// Message for the price field, if it failed.
    #[must_use]
    pub fn price_message(&self) -> Option<&'static str> {
        self.price.map(|e| e.message())
    }

    /// Message for the quantity field, if it failed.
    #[must_use]
    pub fn quantity_message(&self) -> Option<&'static str> {
        self.quantity.map(|e| e.message())
    }
}

/// The transient, unvalidated draft for one product.
///
/// Numeric fields are strings here because this is what the inputs hold;
/// numbers only exist after validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub category: String,
}

impl ProductForm {
    /// A blank draft with the default category, for open-for-create.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            category: Category::default().as_str().to_owned(),
            ..Self::default()
        }
    }

    /// A draft seeded from an existing product, for open-for-edit.
    ///
    /// Numeric fields are stringified for editing.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            quantity: product.quantity.to_string(),
            category: product.category.as_str().to_owned(),
        }
    }

    /// Validate the draft, yielding a normalized record or per-field errors.
    ///
    /// Runs every rule so the modal can show all failures at once. The
    /// category falls back to the default if tampered with; the select
    /// control is the real constraint there.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] when any rule fails; no repository call may
    /// happen in that case.
    pub fn validate(&self) -> Result<ProductInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.name = Some(FieldError::EmptyField);
        }

        let price = match Decimal::from_str(self.price.trim()) {
            Ok(p) if p > Decimal::ZERO => Some(p),
            _ => {
                errors.price = Some(FieldError::InvalidPrice);
                None
            }
        };

        let quantity = match self.quantity.trim().parse::<i32>() {
            Ok(q) if q >= 0 => Some(q),
            _ => {
                errors.quantity = Some(FieldError::InvalidQuantity);
                None
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        // Both are Some here: errors.is_empty() implies every rule passed
        let (Some(price), Some(quantity)) = (price, quantity) else {
            return Err(errors);
        };

        Ok(ProductInput {
            name: name.to_owned(),
            price,
            quantity,
            category: Category::from_str(&self.category).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Widget".to_owned(),
            price: "9.99".to_owned(),
            quantity: "5".to_owned(),
            category: "Electronics".to_owned(),
        }
    }

    #[test]
    fn test_valid_draft_normalizes() {
        let form = ProductForm {
            name: "  Widget  ".to_owned(),
            ..valid_form()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.name, "Widget");
        assert_eq!(input.price, Decimal::from_str("9.99").unwrap());
        assert_eq!(input.quantity, 5);
        assert_eq!(input.category, Category::Electronics);
    }

    #[test]
    fn test_empty_name_blocks() {
        let form = ProductForm {
            name: "   ".to_owned(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.name, Some(FieldError::EmptyField));
        assert_eq!(errors.price, None);
        assert_eq!(errors.quantity, None);
    }

    #[test]
    fn test_zero_price_blocks() {
        let form = ProductForm {
            price: "0".to_owned(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.price, Some(FieldError::InvalidPrice));
        assert!(errors.name.is_none() && errors.quantity.is_none());
    }

    #[test]
    fn test_unparseable_price_blocks() {
        let form = ProductForm {
            price: "nine".to_owned(),
            ..valid_form()
        };
        assert_eq!(
            form.validate().unwrap_err().price,
            Some(FieldError::InvalidPrice)
        );
    }

    #[test]
    fn test_negative_quantity_blocks() {
        let form = ProductForm {
            quantity: "-1".to_owned(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.quantity, Some(FieldError::InvalidQuantity));
    }

    #[test]
    fn test_zero_quantity_is_valid() {
        let form = ProductForm {
            quantity: "0".to_owned(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().quantity, 0);
    }

    #[test]
    fn test_fractional_quantity_blocks() {
        let form = ProductForm {
            quantity: "2.5".to_owned(),
            ..valid_form()
        };
        assert_eq!(
            form.validate().unwrap_err().quantity,
            Some(FieldError::InvalidQuantity)
        );
    }

    #[test]
    fn test_clear_clears_only_that_field() {
        let form = ProductForm {
            name: String::new(),
            price: "free".to_owned(),
            ..valid_form()
        };
        let mut errors = form.validate().unwrap_err();
        assert!(errors.name.is_some() && errors.price.is_some());

        errors.clear(Field::Price);
        assert_eq!(errors.price, None);
        assert_eq!(errors.name, Some(FieldError::EmptyField));
    }

    #[test]
    fn test_from_product_stringifies_numerics() {
        use chrono::Utc;
        use inventory_hub_core::ProductId;

        let product = Product {
            id: ProductId::new(uuid::Uuid::new_v4()),
            name: "Widget".to_owned(),
            price: Decimal::from_str("19.50").unwrap(),
            quantity: 3,
            category: Category::Grocery,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let form = ProductForm::from_product(&product);
        assert_eq!(form.price, "19.50");
        assert_eq!(form.quantity, "3");
        assert_eq!(form.category, "Grocery");
    }

    #[test]
    fn test_blank_defaults_to_electronics() {
        assert_eq!(ProductForm::blank().category, "Electronics");
    }

    #[test]
    fn test_unknown_category_falls_back_to_default() {
        let form = ProductForm {
            category: "Furniture".to_owned(),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().category, Category::Electronics);
    }
}
