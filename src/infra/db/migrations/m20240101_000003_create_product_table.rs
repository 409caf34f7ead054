//! Migration: create t_product.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TProduct::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TProduct::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TProduct::CategoryId).integer().not_null())
                    .col(ColumnDef::new(TProduct::ItemType).string_len(100).not_null())
                    .col(ColumnDef::new(TProduct::Title).string_len(100).not_null())
                    .col(ColumnDef::new(TProduct::SellPoint).string_len(150).not_null())
                    .col(ColumnDef::new(TProduct::Price).big_integer().not_null())
                    .col(ColumnDef::new(TProduct::Num).integer().not_null().default(0))
                    .col(ColumnDef::new(TProduct::Image).string_len(500).not_null())
                    .col(ColumnDef::new(TProduct::Status).integer().not_null().default(1))
                    .col(ColumnDef::new(TProduct::Priority).integer().not_null().default(0))
                    .col(ColumnDef::new(TProduct::CreatedUser).string_len(20).not_null())
                    .col(
                        ColumnDef::new(TProduct::CreatedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TProduct::ModifiedUser).string_len(20).not_null())
                    .col(
                        ColumnDef::new(TProduct::ModifiedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Hot list scans on-sale rows by priority
        manager
            .create_index(
                Index::create()
                    .name("idx_t_product_status_priority")
                    .table(TProduct::Table)
                    .col(TProduct::Status)
                    .col(TProduct::Priority)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TProduct::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TProduct {
    Table,
    Id,
    CategoryId,
    ItemType,
    Title,
    SellPoint,
    Price,
    Num,
    Image,
    Status,
    Priority,
    CreatedUser,
    CreatedTime,
    ModifiedUser,
    ModifiedTime,
}
