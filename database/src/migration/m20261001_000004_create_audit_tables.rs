use sea_orm_migration::prelude::*;

use super::m20261001_000002_create_users_tables::Users;
use super::m20261001_000003_create_assets_table::Assets;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Per-field change log, removed together with its asset
        manager
            .create_table(
                Table::create()
                    .table(AssetHistory::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AssetHistory::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(AssetHistory::AssetId).integer().not_null())
                    .col(ColumnDef::new(AssetHistory::UserId).integer().null())
                    .col(ColumnDef::new(AssetHistory::Username).string_len(150).not_null())
                    .col(ColumnDef::new(AssetHistory::Field).string_len(100).not_null())
                    .col(ColumnDef::new(AssetHistory::OldValue).text().null())
                    .col(ColumnDef::new(AssetHistory::NewValue).text().null())
                    .col(ColumnDef::new(AssetHistory::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_history_asset_id")
                            .from(AssetHistory::Table, AssetHistory::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_history_user_id")
                            .from(AssetHistory::Table, AssetHistory::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_asset_history_asset_id")
                    .table(AssetHistory::Table)
                    .col(AssetHistory::AssetId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Lifecycle events outlive the asset: the link is nulled, the label snapshot stays
        manager
            .create_table(
                Table::create()
                    .table(AssetTraceability::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AssetTraceability::Id).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(AssetTraceability::AssetId).integer().null())
                    .col(ColumnDef::new(AssetTraceability::AssetLabel).string_len(200).not_null())
                    .col(ColumnDef::new(AssetTraceability::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(AssetTraceability::UserId).integer().null())
                    .col(ColumnDef::new(AssetTraceability::Username).string_len(150).not_null())
                    .col(ColumnDef::new(AssetTraceability::ZoneFrom).string_len(100).null())
                    .col(ColumnDef::new(AssetTraceability::ZoneTo).string_len(100).null())
                    .col(ColumnDef::new(AssetTraceability::StatusBefore).string_len(100).null())
                    .col(ColumnDef::new(AssetTraceability::StatusAfter).string_len(100).null())
                    .col(ColumnDef::new(AssetTraceability::Description).text().null())
                    .col(ColumnDef::new(AssetTraceability::CreatedAt).timestamp_with_time_zone().not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_traceability_asset_id")
                            .from(AssetTraceability::Table, AssetTraceability::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_asset_traceability_user_id")
                            .from(AssetTraceability::Table, AssetTraceability::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_asset_traceability_asset_id")
                    .table(AssetTraceability::Table)
                    .col(AssetTraceability::AssetId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_asset_traceability_created_at")
                    .table(AssetTraceability::Table)
                    .col(AssetTraceability::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AssetTraceability::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssetHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AssetHistory {
    Table,
    Id,
    AssetId,
    UserId,
    Username,
    Field,
    OldValue,
    NewValue,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AssetTraceability {
    Table,
    Id,
    AssetId,
    AssetLabel,
    Kind,
    UserId,
    Username,
    ZoneFrom,
    ZoneTo,
    StatusBefore,
    StatusAfter,
    Description,
    CreatedAt,
}
