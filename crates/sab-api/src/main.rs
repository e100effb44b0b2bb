//! # sab-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the Smart Address Book.
//! Binds to `BIND_ADDR:PORT` (default `0.0.0.0:5000`).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sab_api::config::{AppConfig, LogFormat};
use sab_api::store::{init_pool, AddressStore, MemoryAddressStore, PgAddressStore};
use sab_api::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(config.log_format);
    tracing::debug!(?config, "configuration loaded");

    // A configured database that cannot be reached is fatal; no fallback
    // to memory.
    let pool = init_pool(&config).await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let store: Arc<dyn AddressStore> = match &pool {
        Some(pool) => Arc::new(PgAddressStore::new(
            pool.clone(),
            config.default_country.clone(),
        )),
        None => Arc::new(MemoryAddressStore::new(config.default_country.clone())),
    };
    tracing::info!(backend = store.backend(), "address store ready");

    let addr = SocketAddr::new(config.bind_addr, config.port);
    let app = sab_api::app(AppState::with_store(config, store));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Smart Address Book API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }
    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
