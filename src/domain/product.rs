//! Product catalogue entities.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::PRODUCT_STATUS_ON_SALE;

/// Product row
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub item_type: String,
    pub title: String,
    pub sell_point: String,
    /// Price in the smallest currency unit
    pub price: i64,
    /// Units in stock
    pub num: i32,
    pub image: String,
    pub status: i32,
    pub priority: i32,
    #[serde(skip)]
    pub created_time: DateTime<Utc>,
    #[serde(skip)]
    pub modified_time: DateTime<Utc>,
}

impl Product {
    pub fn is_on_sale(&self) -> bool {
        self.status == PRODUCT_STATUS_ON_SALE
    }
}

/// Entry of the hot-product list
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductSummary {
    pub id: i32,
    pub title: String,
    pub price: i64,
    pub image: String,
}

impl From<Product> for ProductSummary {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            title: p.title,
            price: p.price,
            image: p.image,
        }
    }
}
