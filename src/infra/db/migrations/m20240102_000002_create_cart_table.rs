//! Migration: create t_cart.
//!
//! One row per (uid, pid); adding the same product again bumps `num`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TCart::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TCart::Cid)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TCart::Uid).integer().not_null())
                    .col(ColumnDef::new(TCart::Pid).integer().not_null())
                    .col(ColumnDef::new(TCart::Price).big_integer().not_null())
                    .col(ColumnDef::new(TCart::Num).integer().not_null())
                    .col(ColumnDef::new(TCart::CreatedUser).string_len(20).not_null())
                    .col(
                        ColumnDef::new(TCart::CreatedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TCart::ModifiedUser).string_len(20).not_null())
                    .col(
                        ColumnDef::new(TCart::ModifiedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_t_cart_uid")
                            .from(TCart::Table, TCart::Uid)
                            .to(TUser::Table, TUser::Uid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_t_cart_uid_pid")
                    .table(TCart::Table)
                    .col(TCart::Uid)
                    .col(TCart::Pid)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TCart::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TCart {
    Table,
    Cid,
    Uid,
    Pid,
    Price,
    Num,
    CreatedUser,
    CreatedTime,
    ModifiedUser,
    ModifiedTime,
}

#[derive(Iden)]
enum TUser {
    Table,
    Uid,
}
