//! Product store: mutations plus the live full-list feed.
//!
//! [`ProductStore`] is the single write path to the product collection. Every
//! mutation re-queries the full name-ordered list and broadcasts it to all
//! subscribers, so the canonical list every client holds is always a direct
//! projection of the collection — full-list replace, no incremental patching.
//!
//! Subscriptions are scoped: [`ProductStore::subscribe`] returns a
//! [`ProductsSubscription`] guard, and dropping the guard releases the
//! subscription. Holders (the SSE route) keep exactly one per connection.

use sqlx::PgPool;
use tokio::sync::watch;

use inventory_hub_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::models::{Product, ProductInput};

/// The product collection with its live feed.
#[derive(Clone)]
pub struct ProductStore {
    pool: PgPool,
    tx: watch::Sender<Vec<Product>>,
}

impl ProductStore {
    /// Create a store over the given pool, with an empty feed until
    /// [`Self::load`] runs.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { pool, tx }
    }

    /// Load the initial canonical list. Called once at startup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the initial query fails.
    pub async fn load(&self) -> Result<(), RepositoryError> {
        self.refresh().await
    }

    /// Insert a product, then push the updated list to all subscribers.
    ///
    /// # Errors
    ///
    /// Propagates `RepositoryError` from the insert or the re-query; the
    /// caller logs detail and surfaces a generic message.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let product = ProductRepository::new(&self.pool).create(input).await?;
        self.refresh().await?;
        Ok(product)
    }

    /// Replace a product's fields, then push the updated list.
    ///
    /// # Errors
    ///
    /// Propagates `RepositoryError::NotFound` when the id is gone, or any
    /// other repository failure.
    pub async fn update_by_id(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, RepositoryError> {
        let product = ProductRepository::new(&self.pool)
            .update_by_id(id, input)
            .await?;
        self.refresh().await?;
        Ok(product)
    }

    /// Delete a product, then push the updated list.
    ///
    /// # Errors
    ///
    /// Propagates `RepositoryError::NotFound` when the id is already gone, or
    /// any other repository failure.
    pub async fn delete_by_id(&self, id: ProductId) -> Result<(), RepositoryError> {
        ProductRepository::new(&self.pool).delete_by_id(id).await?;
        self.refresh().await
    }

    /// Read a single product (form pre-fill for edit).
    ///
    /// # Errors
    ///
    /// Propagates `RepositoryError` from the query.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(&self.pool).get_by_id(id).await
    }

    /// The canonical list as of the latest push.
    #[must_use]
    pub fn current(&self) -> Vec<Product> {
        self.tx.borrow().clone()
    }

    /// Subscribe to list pushes.
    ///
    /// The subscription sees the current list immediately via
    /// [`ProductsSubscription::current`] and wakes on every subsequent push.
    /// Dropping the guard unsubscribes.
    #[must_use]
    pub fn subscribe(&self) -> ProductsSubscription {
        ProductsSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Re-query the full ordered list and broadcast it.
    async fn refresh(&self) -> Result<(), RepositoryError> {
        let list = ProductRepository::new(&self.pool).list_ordered().await?;
        self.publish(list);
        Ok(())
    }

    /// Broadcast a new canonical list to all subscribers.
    fn publish(&self, list: Vec<Product>) {
        // send_replace stores the value even when no subscriber is connected
        self.tx.send_replace(list);
    }
}

/// Error returned when the feed has shut down.
#[derive(Debug, thiserror::Error)]
#[error("product feed closed")]
pub struct FeedClosed;

/// A live subscription to the canonical product list.
///
/// Dropping this releases the subscription; there is no explicit
/// unsubscribe call to forget.
pub struct ProductsSubscription {
    rx: watch::Receiver<Vec<Product>>,
}

impl ProductsSubscription {
    /// The list carried by the latest push.
    #[must_use]
    pub fn current(&self) -> Vec<Product> {
        self.rx.borrow().clone()
    }

    /// Wait for the next push.
    ///
    /// # Errors
    ///
    /// Returns [`FeedClosed`] once the store has been dropped.
    pub async fn changed(&mut self) -> Result<(), FeedClosed> {
        self.rx.changed().await.map_err(|_| FeedClosed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use inventory_hub_core::Category;
    use rust_decimal::Decimal;

    fn lazy_store() -> ProductStore {
        // connect_lazy never touches the network; these tests only exercise
        // the feed side of the store
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        ProductStore::new(pool)
    }

    fn product(name: &str) -> Product {
        Product {
            id: ProductId::new(uuid::Uuid::new_v4()),
            name: name.to_owned(),
            price: Decimal::new(999, 2),
            quantity: 5,
            category: Category::Electronics,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_subscription_sees_initial_and_pushed_lists() {
        let store = lazy_store();
        store.publish(vec![product("Widget")]);

        let mut sub = store.subscribe();
        assert_eq!(sub.current().len(), 1);

        store.publish(vec![product("Gadget"), product("Widget")]);
        sub.changed().await.unwrap();
        assert_eq!(sub.current().len(), 2);
    }

    #[tokio::test]
    async fn test_push_is_full_list_replace() {
        let store = lazy_store();
        store.publish(vec![product("Widget"), product("Gadget")]);

        let sub = store.subscribe();
        store.publish(vec![product("Gadget")]);
        // last push wins wholesale; nothing of the older list survives
        let names: Vec<_> = sub.current().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Gadget"]);
    }

    #[tokio::test]
    async fn test_changed_errors_after_store_drop() {
        let store = lazy_store();
        let mut sub = store.subscribe();
        drop(store);
        assert!(sub.changed().await.is_err());
    }
}
