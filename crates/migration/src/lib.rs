//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20230101_000001_create_user;
mod m20230101_000002_create_service;
mod m20230101_000003_create_appointment;
mod m20230101_000004_create_invoice;
mod m20230101_000009_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230101_000001_create_user::Migration),
            Box::new(m20230101_000002_create_service::Migration),
            Box::new(m20230101_000003_create_appointment::Migration),
            Box::new(m20230101_000004_create_invoice::Migration),
            // Indexes should always be applied last
            Box::new(m20230101_000009_add_indexes::Migration),
        ]
    }
}
