//! District dictionary repository (read-only).

use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use super::entities::district::{self, Entity as DistrictEntity};
use crate::domain::District;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DistrictRepository: Send + Sync {
    /// Children of a district code, ordered by code
    async fn list_by_parent(&self, parent: &str) -> AppResult<Vec<District>>;

    async fn find_by_code(&self, code: &str) -> AppResult<Option<District>>;
}

/// SeaORM implementation of [`DistrictRepository`]
pub struct DistrictStore<C> {
    conn: Arc<C>,
}

impl<C> DistrictStore<C> {
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> DistrictRepository for DistrictStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn list_by_parent(&self, parent: &str) -> AppResult<Vec<District>> {
        let models = DistrictEntity::find()
            .filter(district::Column::Parent.eq(parent))
            .order_by_asc(district::Column::Code)
            .all(self.conn.as_ref())
            .await?;

        Ok(models.into_iter().map(District::from).collect())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<District>> {
        let result = DistrictEntity::find()
            .filter(district::Column::Code.eq(code))
            .one(self.conn.as_ref())
            .await?;

        Ok(result.map(District::from))
    }
}
