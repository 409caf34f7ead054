//! District dictionary entity.

use sea_orm::entity::prelude::*;

use crate::domain::District;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "t_dict_district")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub parent: String,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for District {
    fn from(model: Model) -> Self {
        District {
            id: model.id,
            parent: model.parent,
            code: model.code,
            name: model.name,
        }
    }
}
