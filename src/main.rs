mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use std::sync::Arc;

use handlers::rest;
use repository::PostgresRepository;
use service::NoteService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load config
    let cfg = config::load_config().inspect_err(|e| {
        tracing::error!("Failed to load configuration: {e}");
    })?;
    tracing::info!(
        "Connecting to database {} at {}:{}",
        cfg.postgres_db,
        cfg.postgres_host,
        cfg.postgres_port
    );

    // Repository creation and migration
    let mut repo = PostgresRepository::connect(&cfg.database())
        .await
        .inspect_err(|e| tracing::error!("Failed to establish database connection: {e}"))?;

    repo.migrate()
        .await
        .inspect_err(|e| tracing::error!("Failed to migrate database: {e}"))?;

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    let router = rest::router(service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.server_port)).await?;
    tracing::info!("REST server starting, listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| tracing::error!("HTTP server error: {e}"))?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
