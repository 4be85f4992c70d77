use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_reference_tables::Zones;

/// Zone new assets fall back to when none is given
const DEFAULT_ZONE: &str = "Valledupar";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let insert = Query::insert()
            .into_table(Zones::Table)
            .columns([Zones::Name, Zones::Description])
            .values([DEFAULT_ZONE.into(), "Default zone".into()])
            .map_err(|e| DbErr::Migration(e.to_string()))?
            .on_conflict(OnConflict::column(Zones::Name).do_nothing().to_owned())
            .to_owned();

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Zones::Table)
            .and_where(Expr::col(Zones::Name).eq(DEFAULT_ZONE))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
