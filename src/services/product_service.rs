//! Product service - catalogue reads.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::HOT_PRODUCT_LIMIT;
use crate::domain::{Product, ProductSummary};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ProductService: Send + Sync {
    /// On-sale products with the highest priority
    async fn hot_list(&self) -> AppResult<Vec<ProductSummary>>;

    async fn get(&self, id: i32) -> AppResult<Product>;
}

pub struct ProductCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProductCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductCatalog<U> {
    async fn hot_list(&self) -> AppResult<Vec<ProductSummary>> {
        let products = self.uow.products().find_hot(HOT_PRODUCT_LIMIT).await?;
        Ok(products.into_iter().map(ProductSummary::from).collect())
    }

    async fn get(&self, id: i32) -> AppResult<Product> {
        self.uow
            .products()
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }
}
