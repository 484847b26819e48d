use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect the store, apply the schema and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!(event = "schema_ready", "company schema applied");

    let state = ServerState::new(db);
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and serve until `shutdown` resolves
pub async fn run(cfg: AppConfig, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "starting company registry server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
