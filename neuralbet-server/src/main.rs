//! Gaucho NeuralBet API server binary
//!
//! Loads configuration, connects the user store, builds the predictor engine,
//! and serves the router. A missing database connection string is fatal by
//! design; everything past startup resolves failures to tagged responses.

use anyhow::{Context, Result};
use neuralbet_core::PredictorEngine;
use neuralbet_server::config::Config;
use neuralbet_server::routes;
use neuralbet_server::state::AppState;
use neuralbet_server::users::PgUserStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("neuralbet_server=info,neuralbet_core=info,tower_http=info")),
        )
        .init();

    info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    info!("Connecting to database...");
    let store = PgUserStore::connect(&config.database_url)
        .await
        .context("Database connection failed")?;

    let engine = PredictorEngine::new(config.predictor.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, Arc::new(store), Arc::new(engine));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server started at port {}", addr.port());

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
