use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::land_parcel::{LandParcelRepository, SeaOrmLandParcelRepository};

use crate::routes::{self, ServerState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect to the configured database, apply migrations and build the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    models::db::migrate(&db).await?;
    info!("database migrations applied");

    let repo: Arc<dyn LandParcelRepository> = Arc::new(SeaOrmLandParcelRepository::new(db));
    Ok(routes::build_router(ServerState::new(repo), build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutting down");
        return;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and serve it until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let listener = TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "land parcel server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
