use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// Build a pooled connection from explicit settings.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    if let Some(path) = cfg.sqlite_path() {
        common::env::ensure_parent_dir(path).await?;
    }

    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);

    if cfg.is_in_memory() {
        // every pooled connection would otherwise see its own empty database
        opts.max_connections(1).min_connections(1);
    } else {
        opts.max_connections(cfg.max_connections)
            .min_connections(cfg.min_connections)
            .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs));
    }

    let db = Database::connect(opts).await?;
    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}
