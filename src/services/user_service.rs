//! User service - registration, login and self-service profile changes.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewUser, Password, ProfileUpdate, UserProfile, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
///
/// Lookups skip soft-deleted accounts, except the duplicate check on
/// registration which keeps deleted usernames reserved.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account; audit fields are set to the new username
    async fn register(&self, username: String, password: String) -> AppResult<UserResponse>;

    /// Check credentials and return the identity to keep in the session
    async fn login(&self, username: String, password: String) -> AppResult<UserResponse>;

    async fn change_password(
        &self,
        uid: i32,
        username: String,
        old_password: String,
        new_password: String,
    ) -> AppResult<()>;

    async fn profile(&self, uid: i32) -> AppResult<UserProfile>;

    async fn change_info(&self, uid: i32, username: String, info: ProfileUpdate) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn register(&self, username: String, password: String) -> AppResult<UserResponse> {
        if self
            .uow
            .users()
            .find_by_username_with_deleted(&username)
            .await?
            .is_some()
        {
            return Err(AppError::UsernameDuplicated(username));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                username,
                password_hash,
            })
            .await?;

        tracing::info!(uid = user.uid, username = %user.username, "User registered");
        Ok(UserResponse::from(user))
    }

    async fn login(&self, username: String, password: String) -> AppResult<UserResponse> {
        let user = self
            .uow
            .users()
            .find_by_username(&username)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !Password::from_hash(user.password_hash.clone()).verify(&password) {
            tracing::debug!(username = %username, "Login rejected: wrong password");
            return Err(AppError::PasswordNotMatch);
        }

        tracing::info!(uid = user.uid, "User logged in");
        Ok(UserResponse::from(user))
    }

    async fn change_password(
        &self,
        uid: i32,
        username: String,
        old_password: String,
        new_password: String,
    ) -> AppResult<()> {
        let user = self
            .uow
            .users()
            .find_by_uid(uid)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !Password::from_hash(user.password_hash).verify(&old_password) {
            return Err(AppError::PasswordNotMatch);
        }

        let password_hash = Password::new(&new_password)?.into_string();
        let rows = self
            .uow
            .users()
            .update_password(uid, password_hash, username)
            .await?;
        if rows != 1 {
            return Err(AppError::update("password was not changed"));
        }

        tracing::info!(uid, "Password changed");
        Ok(())
    }

    async fn profile(&self, uid: i32) -> AppResult<UserProfile> {
        self.uow
            .users()
            .find_by_uid(uid)
            .await?
            .map(UserProfile::from)
            .ok_or(AppError::UserNotFound)
    }

    async fn change_info(&self, uid: i32, username: String, info: ProfileUpdate) -> AppResult<()> {
        if self.uow.users().find_by_uid(uid).await?.is_none() {
            return Err(AppError::UserNotFound);
        }

        let rows = self.uow.users().update_info(uid, info, username).await?;
        if rows != 1 {
            return Err(AppError::update("profile was not changed"));
        }
        Ok(())
    }
}
