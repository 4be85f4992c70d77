pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_reference_tables;
mod m20261001_000002_create_users_tables;
mod m20261001_000003_create_assets_table;
mod m20261001_000004_create_audit_tables;
mod m20261001_000005_seed_default_zone;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_reference_tables::Migration),
            Box::new(m20261001_000002_create_users_tables::Migration),
            Box::new(m20261001_000003_create_assets_table::Migration),
            Box::new(m20261001_000004_create_audit_tables::Migration),
            Box::new(m20261001_000005_seed_default_zone::Migration),
        ]
    }
}
