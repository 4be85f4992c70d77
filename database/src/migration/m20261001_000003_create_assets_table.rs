use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_reference_tables::{Brands, Categories};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Assets::Id).integer().not_null().auto_increment().primary_key())
                    // Device identifiers
                    .col(ColumnDef::new(Assets::Imei1).string_len(100).null())
                    .col(ColumnDef::new(Assets::Imei2).string_len(100).null())
                    .col(ColumnDef::new(Assets::SerialNumber).string_len(100).null())
                    .col(ColumnDef::new(Assets::MacAddress).string_len(100).null())
                    .col(ColumnDef::new(Assets::Iccid).string_len(100).null())
                    .col(ColumnDef::new(Assets::Carrier).string_len(100).null())
                    // Assignment
                    .col(ColumnDef::new(Assets::Document).string_len(100).null())
                    .col(ColumnDef::new(Assets::HolderName).string_len(200).null())
                    .col(ColumnDef::new(Assets::Position).string_len(100).not_null().default("street_vendor"))
                    .col(ColumnDef::new(Assets::Responsible).string_len(100).null())
                    .col(ColumnDef::new(Assets::Identification).string_len(100).null())
                    // Classification
                    .col(ColumnDef::new(Assets::Name).string_len(100).null())
                    .col(ColumnDef::new(Assets::CategoryId).integer().null())
                    .col(ColumnDef::new(Assets::BrandId).integer().null())
                    .col(ColumnDef::new(Assets::Status).string_len(100).not_null().default("confirmed"))
                    // Location and cost center
                    .col(ColumnDef::new(Assets::Zone).string_len(100).not_null().default("Valledupar"))
                    .col(ColumnDef::new(Assets::Observation).text().not_null().default("VERIFICADO"))
                    .col(ColumnDef::new(Assets::PointOfSale).string_len(100).null())
                    .col(ColumnDef::new(Assets::CostCenterCode).string_len(100).null())
                    .col(ColumnDef::new(Assets::CostCenterName).string_len(100).null())
                    .col(ColumnDef::new(Assets::WarehouseExitDate).date().null())
                    .col(ColumnDef::new(Assets::ConfirmedOn).date().not_null())
                    .col(ColumnDef::new(Assets::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .col(ColumnDef::new(Assets::UpdatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_category_id")
                            .from(Assets::Table, Assets::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_brand_id")
                            .from(Assets::Table, Assets::BrandId)
                            .to(Brands::Table, Brands::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Filter columns used by the listing, reports and export
        manager
            .create_index(
                Index::create()
                    .name("idx_assets_status")
                    .table(Assets::Table)
                    .col(Assets::Status)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assets_zone")
                    .table(Assets::Table)
                    .col(Assets::Zone)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assets_serial_number")
                    .table(Assets::Table)
                    .col(Assets::SerialNumber)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Assets {
    Table,
    Id,
    Imei1,
    Imei2,
    SerialNumber,
    MacAddress,
    Iccid,
    Carrier,
    Document,
    HolderName,
    Position,
    Responsible,
    Identification,
    Name,
    CategoryId,
    BrandId,
    Status,
    Zone,
    Observation,
    PointOfSale,
    CostCenterCode,
    CostCenterName,
    WarehouseExitDate,
    ConfirmedOn,
    CreatedAt,
    UpdatedAt,
}
