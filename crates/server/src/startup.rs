use std::{sync::Arc, time::Duration};

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use common::env::ensure_sqlite_dir;
use configs::AppConfig;
use service::product::repo::SeaOrmProductRepository;
use service::{AppService, CatFactService, CompositeService, LoggingService, ProductService};

use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the full service stack: logging over a composite of the fact client
/// and the product service backed by the database.
pub fn build_service(db: DatabaseConnection, fact_url: &str) -> Arc<dyn AppService> {
    let repo = Arc::new(SeaOrmProductRepository::new(db));
    let products = ProductService::new(repo);
    let facts = CatFactService::new(fact_url);
    Arc::new(LoggingService::new(CompositeService::new(facts, products)))
}

/// Build the router for a given service object and config.
pub fn build_app(svc: Arc<dyn AppService>, cfg: &AppConfig) -> Router {
    let timeout = Duration::from_secs(cfg.server.request_timeout_secs);
    routes::build_router(AppState::new(svc), build_cors(), timeout)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received, draining connections");
}

/// Public entry: connect storage, build the app and serve until Ctrl-C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    ensure_sqlite_dir(&cfg.database.url).await?;
    let db = models::db::connect_and_migrate(&cfg.database).await?;

    let svc = build_service(db, &cfg.fact.url);
    let app = build_app(svc, &cfg);

    let addr = cfg.server.bind_addr();
    info!(%addr, fact_url = %cfg.fact.url, "starting product api");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
