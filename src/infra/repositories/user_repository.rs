//! User repository implementation with soft delete support.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
};
use std::sync::Arc;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, ProfileUpdate, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups exclude soft-deleted users unless the method name says otherwise.
/// Update methods return the number of affected rows.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find active user by uid
    async fn find_by_uid(&self, uid: i32) -> AppResult<Option<User>>;

    /// Find active user by username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find user by username including soft-deleted
    async fn find_by_username_with_deleted(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new user
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Replace the password hash of an active user
    async fn update_password(
        &self,
        uid: i32,
        password_hash: String,
        modified_user: String,
    ) -> AppResult<u64>;

    /// Overwrite phone, email and gender of an active user
    async fn update_info(
        &self,
        uid: i32,
        info: ProfileUpdate,
        modified_user: String,
    ) -> AppResult<u64>;
}

/// SeaORM implementation of [`UserRepository`].
///
/// `C` is either the pooled `DatabaseConnection` or a `DatabaseTransaction`.
pub struct UserStore<C> {
    conn: Arc<C>,
}

impl<C> UserStore<C> {
    /// Create new repository instance
    pub fn new(conn: Arc<C>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C> UserRepository for UserStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_uid(&self, uid: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(uid)
            .filter(user::Column::DeletedAt.is_null())
            .one(self.conn.as_ref())
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::DeletedAt.is_null())
            .one(self.conn.as_ref())
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_username_with_deleted(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn.as_ref())
            .await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let username = new_user.username.clone();
        let active_model = ActiveModel {
            username: Set(new_user.username.clone()),
            password: Set(new_user.password_hash),
            phone: Set(None),
            email: Set(None),
            gender: Set(None),
            created_user: Set(new_user.username.clone()),
            created_time: Set(now),
            modified_user: Set(new_user.username),
            modified_time: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let model = active_model
            .insert(self.conn.as_ref())
            .await
            .map_err(|err| create_error(err, username))?;

        Ok(User::from(model))
    }

    async fn update_password(
        &self,
        uid: i32,
        password_hash: String,
        modified_user: String,
    ) -> AppResult<u64> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Password, Expr::value(password_hash))
            .col_expr(user::Column::ModifiedUser, Expr::value(modified_user))
            .col_expr(user::Column::ModifiedTime, Expr::value(chrono::Utc::now()))
            .filter(user::Column::Uid.eq(uid))
            .filter(user::Column::DeletedAt.is_null())
            .exec(self.conn.as_ref())
            .await?;

        Ok(result.rows_affected)
    }

    async fn update_info(
        &self,
        uid: i32,
        info: ProfileUpdate,
        modified_user: String,
    ) -> AppResult<u64> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Phone, Expr::value(info.phone))
            .col_expr(user::Column::Email, Expr::value(info.email))
            .col_expr(
                user::Column::Gender,
                Expr::value(info.gender.map(|g| g.as_i32())),
            )
            .col_expr(user::Column::ModifiedUser, Expr::value(modified_user))
            .col_expr(user::Column::ModifiedTime, Expr::value(chrono::Utc::now()))
            .filter(user::Column::Uid.eq(uid))
            .filter(user::Column::DeletedAt.is_null())
            .exec(self.conn.as_ref())
            .await?;

        Ok(result.rows_affected)
    }
}

/// Map "no row came back" on insert to the insert-failure variant.
pub(crate) fn insert_error(err: DbErr) -> AppError {
    match err {
        DbErr::RecordNotInserted => AppError::insert("no row was inserted"),
        other => AppError::Database(other),
    }
}

/// A concurrent registration that wins the race on the unique username index
/// surfaces as a duplicate, same as the up-front check.
fn create_error(err: DbErr, username: String) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::UsernameDuplicated(username),
        _ => insert_error(err),
    }
}
