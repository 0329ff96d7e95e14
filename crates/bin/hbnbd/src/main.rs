//! # hbnbd — hbnb API daemon
//!
//! Composition root that wires the storage backend and the HTTP adapter
//! together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`hbnb.toml`, environment variables)
//! - Install the `tracing` subscriber
//! - Build the configured storage backend (JSON file or `SQLite`)
//! - Build the axum router around the application services
//! - Bind to a TCP port and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::error::Error;
use std::sync::Arc;

use hbnb_adapter_http_axum::router;
use hbnb_adapter_http_axum::state::{AppState, Backend};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, StorageBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    match config.storage.backend {
        StorageBackend::File => {
            let storage = hbnb_adapter_storage_file::Config {
                file_path: config.storage.file_path.clone(),
            }
            .build()
            .await;
            serve(&config, storage).await
        }
        StorageBackend::Db => {
            let db = hbnb_adapter_storage_sqlite_sqlx::Config {
                database_url: config.storage.database_url.clone(),
            }
            .build()
            .await?;
            serve(&config, db.storage()).await
        }
    }
}

async fn serve<S: Backend>(config: &Config, storage: S) -> Result<(), Box<dyn Error>> {
    let state = AppState::new(Arc::new(storage));
    let app = router::build(state, &config.cors.allowed_origins);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        address = %bind_addr,
        backend = ?config.storage.backend,
        "hbnbd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await?;

    tracing::info!("hbnbd stopped");
    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
