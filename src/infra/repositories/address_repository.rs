//! Address repository.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;

use super::entities::address::{self, ActiveModel, Entity as AddressEntity};
use super::user_repository::insert_error;
use crate::domain::{Address, AddressDraft};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Address repository trait.
///
/// Update and delete methods return the number of affected rows so the
/// service layer can detect mismatches.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Number of addresses owned by a user
    async fn count_by_uid(&self, uid: i32) -> AppResult<u64>;

    /// Insert a resolved address
    async fn insert(&self, draft: AddressDraft) -> AppResult<Address>;

    async fn find_by_aid(&self, aid: i32) -> AppResult<Option<Address>>;

    /// All addresses of a user, default first, then most recently modified
    async fn list_by_uid(&self, uid: i32) -> AppResult<Vec<Address>>;

    /// Clear the default flag on every address of the user
    async fn clear_default(&self, uid: i32) -> AppResult<u64>;

    /// Flag one address as default
    async fn mark_default(&self, aid: i32, modified_user: String) -> AppResult<u64>;

    async fn delete_by_aid(&self, aid: i32) -> AppResult<u64>;

    /// The user's address with the latest `modified_time`
    async fn find_last_modified(&self, uid: i32) -> AppResult<Option<Address>>;
}

/// SeaORM implementation of [`AddressRepository`]
pub struct AddressStore<C> {
    conn: Arc<C>,
}

impl<C> AddressStore<C> {
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> AddressRepository for AddressStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn count_by_uid(&self, uid: i32) -> AppResult<u64> {
        let count = AddressEntity::find()
            .filter(address::Column::Uid.eq(uid))
            .count(self.conn.as_ref())
            .await?;

        Ok(count)
    }

    async fn insert(&self, draft: AddressDraft) -> AppResult<Address> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            uid: Set(draft.uid),
            name: Set(draft.name),
            province_code: Set(draft.province_code),
            province_name: Set(draft.province_name),
            city_code: Set(draft.city_code),
            city_name: Set(draft.city_name),
            area_code: Set(draft.area_code),
            area_name: Set(draft.area_name),
            zip: Set(draft.zip),
            address: Set(draft.address),
            phone: Set(draft.phone),
            tel: Set(draft.tel),
            tag: Set(draft.tag),
            is_default: Set(i32::from(draft.is_default)),
            created_user: Set(draft.username.clone()),
            created_time: Set(now),
            modified_user: Set(draft.username),
            modified_time: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(self.conn.as_ref())
            .await
            .map_err(insert_error)?;

        Ok(Address::from(model))
    }

    async fn find_by_aid(&self, aid: i32) -> AppResult<Option<Address>> {
        let result = AddressEntity::find_by_id(aid)
            .one(self.conn.as_ref())
            .await?;

        Ok(result.map(Address::from))
    }

    async fn list_by_uid(&self, uid: i32) -> AppResult<Vec<Address>> {
        let models = AddressEntity::find()
            .filter(address::Column::Uid.eq(uid))
            .order_by_desc(address::Column::IsDefault)
            .order_by_desc(address::Column::ModifiedTime)
            .all(self.conn.as_ref())
            .await?;

        Ok(models.into_iter().map(Address::from).collect())
    }

    async fn clear_default(&self, uid: i32) -> AppResult<u64> {
        let result = AddressEntity::update_many()
            .col_expr(address::Column::IsDefault, Expr::value(0))
            .filter(address::Column::Uid.eq(uid))
            .exec(self.conn.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    async fn mark_default(&self, aid: i32, modified_user: String) -> AppResult<u64> {
        let result = AddressEntity::update_many()
            .col_expr(address::Column::IsDefault, Expr::value(1))
            .col_expr(address::Column::ModifiedUser, Expr::value(modified_user))
            .col_expr(
                address::Column::ModifiedTime,
                Expr::value(chrono::Utc::now()),
            )
            .filter(address::Column::Aid.eq(aid))
            .exec(self.conn.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete_by_aid(&self, aid: i32) -> AppResult<u64> {
        let result = AddressEntity::delete_by_id(aid)
            .exec(self.conn.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    async fn find_last_modified(&self, uid: i32) -> AppResult<Option<Address>> {
        let result = AddressEntity::find()
            .filter(address::Column::Uid.eq(uid))
            .order_by_desc(address::Column::ModifiedTime)
            .one(self.conn.as_ref())
            .await?;

        Ok(result.map(Address::from))
    }
}
