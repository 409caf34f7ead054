//! Product database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Product;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "t_product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_id: i32,
    pub item_type: String,
    pub title: String,
    pub sell_point: String,
    pub price: i64,
    pub num: i32,
    pub image: String,
    pub status: i32,
    pub priority: i32,
    pub created_user: String,
    pub created_time: DateTimeUtc,
    pub modified_user: String,
    pub modified_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: model.id,
            category_id: model.category_id,
            item_type: model.item_type,
            title: model.title,
            sell_point: model.sell_point,
            price: model.price,
            num: model.num,
            image: model.image,
            status: model.status,
            priority: model.priority,
            created_time: model.created_time,
            modified_time: model.modified_time,
        }
    }
}
