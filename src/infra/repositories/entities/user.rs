//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Gender, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "t_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub uid: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<i32>,
    pub created_user: String,
    pub created_time: DateTimeUtc,
    pub modified_user: String,
    pub modified_time: DateTimeUtc,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            uid: model.uid,
            username: model.username,
            password_hash: model.password,
            phone: model.phone,
            email: model.email,
            gender: model.gender.and_then(Gender::from_i32),
            created_user: model.created_user,
            created_time: model.created_time,
            modified_user: model.modified_user,
            modified_time: model.modified_time,
            deleted_at: model.deleted_at,
        }
    }
}
