//! Elegant Weds API - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create the store (PostgreSQL pool + migrations, or in-memory)
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

use std::sync::Arc;

use elegant_weds_api::{
    config::Config,
    db,
    routes::{build_router, cors_layer},
    state::AppState,
    store::{DocumentStore, MemoryStore, PgStore},
};
use tracing_subscriber::EnvFilter;

/// Connect the configured backend. Runs to completion before the listener
/// binds so no request ever sees an uninitialised store.
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, data will be kept in memory only");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = db::create_pool(database_url, config.database_max_connections).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    Ok(Arc::new(PgStore::new(pool)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let store = connect_store(&config).await?;
    let cors = cors_layer(&config.cors_origins)?;
    let app = build_router(AppState::new(store), cors);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
