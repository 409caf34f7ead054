//! Migration: create t_address.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TAddress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TAddress::Aid)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TAddress::Uid).integer().not_null())
                    .col(ColumnDef::new(TAddress::Name).string_len(20).not_null())
                    .col(ColumnDef::new(TAddress::ProvinceCode).string_len(6).not_null())
                    .col(ColumnDef::new(TAddress::ProvinceName).string_len(16).not_null())
                    .col(ColumnDef::new(TAddress::CityCode).string_len(6).not_null())
                    .col(ColumnDef::new(TAddress::CityName).string_len(16).not_null())
                    .col(ColumnDef::new(TAddress::AreaCode).string_len(6).not_null())
                    .col(ColumnDef::new(TAddress::AreaName).string_len(16).not_null())
                    .col(ColumnDef::new(TAddress::Zip).string_len(6).null())
                    .col(ColumnDef::new(TAddress::Address).string_len(50).not_null())
                    .col(ColumnDef::new(TAddress::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(TAddress::Tel).string_len(20).null())
                    .col(ColumnDef::new(TAddress::Tag).string_len(6).null())
                    .col(
                        ColumnDef::new(TAddress::IsDefault)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(TAddress::CreatedUser).string_len(20).not_null())
                    .col(
                        ColumnDef::new(TAddress::CreatedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TAddress::ModifiedUser).string_len(20).not_null())
                    .col(
                        ColumnDef::new(TAddress::ModifiedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_t_address_uid")
                            .from(TAddress::Table, TAddress::Uid)
                            .to(TUser::Table, TUser::Uid)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_t_address_uid")
                    .table(TAddress::Table)
                    .col(TAddress::Uid)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TAddress::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TAddress {
    Table,
    Aid,
    Uid,
    Name,
    ProvinceCode,
    ProvinceName,
    CityCode,
    CityName,
    AreaCode,
    AreaName,
    Zip,
    Address,
    Phone,
    Tel,
    Tag,
    IsDefault,
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
