mod config;
mod db;
mod errors;
mod fitment;
mod models;
mod placement;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::fitment::catalog::Catalog;
use crate::fitment::scoring::WeightedFitmentScorer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Load the career catalog (fails fast on a malformed entry)
    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    info!("Career catalog loaded ({} archetypes)", catalog.len());

    // Initialize the store: PostgreSQL when configured, in-memory otherwise
    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => Arc::new(PgStore::new(create_pool(url).await?)),
        None => Arc::new(InMemoryStore::new()),
    };
    info!("Store initialized (backend: {})", store.backend());

    // Initialize fit scorer
    let fit_scorer = Arc::new(WeightedFitmentScorer::new(config.expected_value_count));
    info!(
        "Fitment scorer: weighted (expected values: {}, top matches: {})",
        fit_scorer.expected_value_count(),
        config.top_matches
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
        fit_scorer,
        store,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
