//! Product repository for database operations.
//!
//! The `products` table is treated as a single logical collection of product
//! documents: insert-one, update-one-by-key, delete-one-by-key, and a full
//! ordered read. The database assigns document identity and timestamps.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use inventory_hub_core::{Category, ProductId};

use super::RepositoryError;
use crate::models::{Product, ProductInput};

/// Row type for the `products` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    price: Decimal,
    quantity: i32,
    category: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        let category = Category::from_str(&self.category).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid category in database: {e}"))
        })?;

        Ok(Product {
            id: self.id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            category,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new product; the database assigns `id` and timestamps.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, price, quantity, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, quantity, category, created_at, updated_at
            ",
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.quantity)
        .bind(input.category.as_str())
        .fetch_one(self.pool)
        .await?;

        row.into_product()
    }

    /// Replace an existing product's fields and refresh `updated_at`.
    ///
    /// The full field set is written; there are no partial-patch semantics.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_by_id(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE products
            SET name = $2, price = $3, quantity = $4, category = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, price, quantity, category, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.price)
        .bind(input.quantity)
        .bind(input.category.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.into_product()
    }

    /// Delete a product by id.
    ///
    /// Deleting an id that is already gone surfaces as `NotFound`, like any
    /// other failure; callers treat it as one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, quantity, category, created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Read the full collection ordered ascending by name.
    ///
    /// This is the canonical projection every subscription push carries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_ordered(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, quantity, category, created_at, updated_at
            FROM products
            ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }
}
