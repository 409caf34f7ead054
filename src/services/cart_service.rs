//! Cart service - one row per (user, product), quantities accumulate.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CartDraft, CartItem, CartView};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait CartService: Send + Sync {
    /// Put `amount` units of a product in the cart, merging with an existing row
    async fn add(&self, uid: i32, pid: i32, amount: i32, username: String) -> AppResult<()>;

    /// Cart rows with product title, image and current price, newest first
    async fn list(&self, uid: i32) -> AppResult<Vec<CartView>>;

    /// Add one unit and return the new quantity
    async fn increment(&self, cid: i32, uid: i32, username: String) -> AppResult<i32>;

    /// The given rows, skipping those the user does not own
    async fn selection(&self, uid: i32, cids: Vec<i32>) -> AppResult<Vec<CartView>>;

    async fn remove(&self, cid: i32, uid: i32) -> AppResult<()>;
}

pub struct CartManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CartManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn owned(&self, cid: i32, uid: i32) -> AppResult<CartItem> {
        let item = self
            .uow
            .carts()
            .find_by_cid(cid)
            .await?
            .ok_or(AppError::CartNotFound)?;

        if item.uid != uid {
            tracing::warn!(cid, uid, owner = item.uid, "Cart access denied");
            return Err(AppError::AccessDenied);
        }
        Ok(item)
    }
}

/// Quantity after adding `amount`, refusing values past `i32::MAX`.
fn quantity_after(num: i32, amount: i32) -> AppResult<i32> {
    num.checked_add(amount)
        .ok_or_else(|| AppError::validation("cart quantity is too large"))
}

#[async_trait]
impl<U: UnitOfWork> CartService for CartManager<U> {
    async fn add(&self, uid: i32, pid: i32, amount: i32, username: String) -> AppResult<()> {
        if amount < 1 {
            return Err(AppError::validation("amount must be at least 1"));
        }

        with_transaction!(self.uow, |repos| {
            let product = repos
                .products()
                .find_by_id(pid)
                .await?
                .ok_or(AppError::ProductNotFound)?;

            if let Some(existing) = repos.carts().find_by_uid_and_pid(uid, pid).await? {
                quantity_after(existing.num, amount)?;
            }

            let item = repos
                .carts()
                .upsert(CartDraft {
                    uid,
                    pid,
                    price: product.price,
                    num: amount,
                    username,
                })
                .await?;
            tracing::debug!(uid, pid, cid = item.cid, num = item.num, "Cart row saved");
            Ok(())
        })
    }

    async fn list(&self, uid: i32) -> AppResult<Vec<CartView>> {
        self.uow.carts().list_views_by_uid(uid).await
    }

    async fn increment(&self, cid: i32, uid: i32, username: String) -> AppResult<i32> {
        let item = self.owned(cid, uid).await?;
        quantity_after(item.num, 1)?;

        let updated = self
            .uow
            .carts()
            .add_num(cid, 1, username)
            .await?
            .ok_or_else(|| AppError::update("cart quantity was not changed"))?;
        Ok(updated.num)
    }

    async fn selection(&self, uid: i32, cids: Vec<i32>) -> AppResult<Vec<CartView>> {
        let views = self.uow.carts().list_views_by_cids(cids).await?;
        Ok(views.into_iter().filter(|view| view.uid == uid).collect())
    }

    async fn remove(&self, cid: i32, uid: i32) -> AppResult<()> {
        self.owned(cid, uid).await?;

        let rows = self.uow.carts().delete_by_cid(cid).await?;
        if rows != 1 {
            return Err(AppError::delete("cart row was not deleted"));
        }
        Ok(())
    }
}
