//! Product repository (read-only).

use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::sync::Arc;

use super::entities::product::{self, Entity as ProductEntity};
use crate::config::PRODUCT_STATUS_ON_SALE;
use crate::domain::Product;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// On-sale products with the highest priority
    async fn find_hot(&self, limit: u64) -> AppResult<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>>;
}

/// SeaORM implementation of [`ProductRepository`]
pub struct ProductStore<C> {
    conn: Arc<C>,
}

impl<C> ProductStore<C> {
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> ProductRepository for ProductStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_hot(&self, limit: u64) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .filter(product::Column::Status.eq(PRODUCT_STATUS_ON_SALE))
            .order_by_desc(product::Column::Priority)
            .limit(limit)
            .all(self.conn.as_ref())
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id).one(self.conn.as_ref()).await?;

        Ok(result.map(Product::from))
    }
}
