//! Migrator for the company registry schema.
//! Applied at startup by the server and by the test helpers; there is no CLI.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_company;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_company::Migration)]
    }
}
