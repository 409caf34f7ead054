//! District service - province/city/area lookups.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::DistrictView;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DistrictService: Send + Sync {
    /// Children of `parent`, ordered by code
    async fn list_by_parent(&self, parent: &str) -> AppResult<Vec<DistrictView>>;

    /// Display name of a district code, `None` when the code is unknown
    async fn name_by_code(&self, code: &str) -> AppResult<Option<String>>;
}

pub struct DistrictDirectory<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DistrictDirectory<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DistrictService for DistrictDirectory<U> {
    async fn list_by_parent(&self, parent: &str) -> AppResult<Vec<DistrictView>> {
        let districts = self.uow.districts().list_by_parent(parent).await?;
        Ok(districts.into_iter().map(DistrictView::from).collect())
    }

    async fn name_by_code(&self, code: &str) -> AppResult<Option<String>> {
        let district = self.uow.districts().find_by_code(code).await?;
        Ok(district.map(|d| d.name))
    }
}
