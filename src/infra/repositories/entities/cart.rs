//! Cart database entity.

use sea_orm::entity::prelude::*;

use crate::domain::CartItem;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "t_cart")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub cid: i32,
    pub uid: i32,
    pub pid: i32,
    pub price: i64,
    pub num: i32,
    pub created_user: String,
    pub created_time: DateTimeUtc,
    pub modified_user: String,
    pub modified_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::Pid",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CartItem {
    fn from(model: Model) -> Self {
        CartItem {
            cid: model.cid,
            uid: model.uid,
            pid: model.pid,
            price: model.price,
            num: model.num,
            created_user: model.created_user,
            created_time: model.created_time,
            modified_user: model.modified_user,
            modified_time: model.modified_time,
        }
    }
}
