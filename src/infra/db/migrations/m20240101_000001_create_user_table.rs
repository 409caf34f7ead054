//! Migration: create t_user.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TUser::Uid)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TUser::Username)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TUser::Password).string().not_null())
                    .col(ColumnDef::new(TUser::Phone).string_len(20).null())
                    .col(ColumnDef::new(TUser::Email).string_len(50).null())
                    .col(ColumnDef::new(TUser::Gender).integer().null())
                    .col(ColumnDef::new(TUser::CreatedUser).string_len(20).not_null())
                    .col(
                        ColumnDef::new(TUser::CreatedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TUser::ModifiedUser).string_len(20).not_null())
                    .col(
                        ColumnDef::new(TUser::ModifiedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TUser::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_t_user_deleted_at")
                    .table(TUser::Table)
                    .col(TUser::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TUser::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TUser {
    Table,
    Uid,
    Username,
    Password,
    Phone,
    Email,
    Gender,
    CreatedUser,
    CreatedTime,
    ModifiedUser,
    ModifiedTime,
    DeletedAt,
}
