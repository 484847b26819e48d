#![cfg(test)]
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;

/// Fresh, migrated in-memory database; each call is isolated from the others.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::with_url("sqlite::memory:")).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
