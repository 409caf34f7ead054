//! Migration: create the district dictionary.
//!
//! Rows are loaded separately (`parent` of top-level provinces is "86").

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TDictDistrict::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TDictDistrict::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TDictDistrict::Parent).string_len(6).not_null())
                    .col(
                        ColumnDef::new(TDictDistrict::Code)
                            .string_len(6)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(TDictDistrict::Name).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_t_dict_district_parent")
                    .table(TDictDistrict::Table)
                    .col(TDictDistrict::Parent)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TDictDistrict::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TDictDistrict {
    Table,
    Id,
    Parent,
    Code,
    Name,
}
