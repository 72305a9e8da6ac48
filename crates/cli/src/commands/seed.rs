//! Seed command: fill the product collection with demo data.
//!
//! # Usage
//!
//! ```bash
//! ih-cli seed
//! ```
//!
//! Inserts a small spread of products across every category, including a few
//! below the low-stock threshold so the dashboard cards have something to
//! show. Running it twice inserts duplicates; it is a demo tool, not a
//! fixture loader.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::PgPool;

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid seed price: {0}")]
    InvalidPrice(#[from] rust_decimal::Error),
}

/// Demo products: (name, price, quantity, category).
const DEMO_PRODUCTS: &[(&str, &str, i32, &str)] = &[
    ("Bluetooth Headphones", "59.99", 24, "Electronics"),
    ("USB-C Charger", "19.99", 7, "Electronics"),
    ("Basmati Rice 5kg", "12.50", 40, "Grocery"),
    ("Olive Oil 1L", "9.75", 6, "Grocery"),
    ("Cotton T-Shirt", "15.00", 32, "Clothing"),
    ("Denim Jacket", "49.00", 4, "Clothing"),
    ("Leather Belt", "22.00", 18, "Accessories"),
    ("Canvas Tote Bag", "11.25", 9, "Accessories"),
];

/// Insert the demo products.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("INVENTORY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| SeedError::MissingEnvVar("INVENTORY_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    for (name, price, quantity, category) in DEMO_PRODUCTS {
        let price = Decimal::from_str(price)?;
        sqlx::query(
            "INSERT INTO products (name, price, quantity, category) VALUES ($1, $2, $3, $4)",
        )
        .bind(name)
        .bind(price)
        .bind(quantity)
        .bind(category)
        .execute(&pool)
        .await?;

        tracing::info!("Seeded {name}");
    }

    tracing::info!("Seeded {} products", DEMO_PRODUCTS.len());
    Ok(())
}
