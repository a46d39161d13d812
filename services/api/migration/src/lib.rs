pub use sea_orm_migration::prelude::MigratorTrait;
use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_fields;
mod m20260301_000003_create_equipment;
mod m20260301_000004_create_inventory;
mod m20260301_000005_create_staff;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_fields::Migration),
            Box::new(m20260301_000003_create_equipment::Migration),
            Box::new(m20260301_000004_create_inventory::Migration),
            Box::new(m20260301_000005_create_staff::Migration),
        ]
    }
}
