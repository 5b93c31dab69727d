//! Process entry point: wires the built-in demo collaborators into one
//! [`Orchestrator`] and serves the seven routes from §6 over HTTP.
//!
//! The session store persists to a redb file whose path is read from
//! `REC_SERVICE_DB_PATH` (default `./rec-service.redb`); every other
//! collaborator (vector index, catalog-detail provider, embedding provider,
//! analytics sink) uses the in-memory demo/no-op implementations until a
//! deployment wires in its own.

use anyhow::Context as _;
use rec_core::analytics::{AnalyticsWriter, NullAnalyticsSink};
use rec_core::catalog::CachedCatalog;
use rec_core::{Orchestrator, RecommenderConfig};
use rec_service::app::AppState;
use rec_service::demo::{DemoCatalogPool, DemoCatalogProvider, DemoVectorIndex};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

const DEFAULT_DB_PATH: &str = "./rec-service.redb";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.example/";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = RecommenderConfig::default();

    let db_path: PathBuf = std::env::var("REC_SERVICE_DB_PATH")
        .unwrap_or_else(|_| DEFAULT_DB_PATH.to_string())
        .into();
    let session_store = rec_storage_redb::RedbStore::open_with_ttl(&db_path, config.session.ttl)
        .await
        .context("failed to open session store")?;

    let catalog = CachedCatalog::builtin_only(config.cache.catalog_ttl);
    let analytics = AnalyticsWriter::new(
        Arc::new(NullAnalyticsSink),
        config.analytics.worker_count,
        config.analytics.max_queue_size,
    );
    let image_base_url = std::env::var("REC_SERVICE_IMAGE_BASE_URL").unwrap_or_else(|_| DEFAULT_IMAGE_BASE_URL.to_string());

    let orchestrator = Orchestrator::new(
        config,
        Arc::new(session_store),
        Arc::new(catalog),
        Arc::new(DemoVectorIndex),
        Arc::new(DemoCatalogPool),
        Arc::new(DemoCatalogProvider::default()),
        None,
        Arc::new(analytics),
        image_base_url,
    );

    let state = AppState::new(Arc::new(orchestrator));
    let router = rec_service::build_router(state);

    let bind_addr = std::env::var("REC_SERVICE_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, db_path = %db_path.display(), "rec-service listening");

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
