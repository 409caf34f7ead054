//! Shopping cart entities and view objects.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::Product;

/// Cart row; unique per `(uid, pid)`
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub cid: i32,
    pub uid: i32,
    pub pid: i32,
    /// Unit price captured when the product was first added
    pub price: i64,
    pub num: i32,
    pub created_user: String,
    pub created_time: DateTime<Utc>,
    pub modified_user: String,
    pub modified_time: DateTime<Utc>,
}

/// New cart row
#[derive(Debug, Clone)]
pub struct CartDraft {
    pub uid: i32,
    pub pid: i32,
    pub price: i64,
    pub num: i32,
    pub username: String,
}

/// Cart row joined with the product it refers to
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CartView {
    pub cid: i32,
    pub uid: i32,
    pub pid: i32,
    /// Price when added
    pub price: i64,
    pub num: i32,
    pub title: String,
    pub image: String,
    /// Current product price
    pub real_price: i64,
}

impl CartView {
    pub fn new(cart: CartItem, product: Product) -> Self {
        Self {
            cid: cart.cid,
            uid: cart.uid,
            pid: cart.pid,
            price: cart.price,
            num: cart.num,
            title: product.title,
            image: product.image,
            real_price: product.price,
        }
    }
}
