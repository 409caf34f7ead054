//! Address database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Address;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "t_address")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub aid: i32,
    pub uid: i32,
    pub name: String,
    pub province_code: String,
    pub province_name: String,
    pub city_code: String,
    pub city_name: String,
    pub area_code: String,
    pub area_name: String,
    pub zip: Option<String>,
    pub address: String,
    pub phone: String,
    pub tel: Option<String>,
    pub tag: Option<String>,
    /// 1 = default address, 0 = not
    pub is_default: i32,
    pub created_user: String,
    pub created_time: DateTimeUtc,
    pub modified_user: String,
    pub modified_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::Uid",
        to = "super::user::Column::Uid"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Address {
    fn from(model: Model) -> Self {
        Address {
            aid: model.aid,
            uid: model.uid,
            name: model.name,
            province_code: model.province_code,
            province_name: model.province_name,
            city_code: model.city_code,
            city_name: model.city_name,
            area_code: model.area_code,
            area_name: model.area_name,
            zip: model.zip,
            address: model.address,
            phone: model.phone,
            tel: model.tel,
            tag: model.tag,
            is_default: model.is_default == 1,
            created_user: model.created_user,
            created_time: model.created_time,
            modified_user: model.modified_user,
            modified_time: model.modified_time,
        }
    }
}
