//! CRM HTTP Server Binary
//!
//! Loads configuration, builds the in-memory customer store, and serves the
//! REST API until interrupted.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin crm-server
//!
//! # Empty store on another port
//! PORT=3000 CRM_SEED=false cargo run --bin crm-server
//! ```
//!
//! # Environment Variables
//!
//! - `CRM_CONFIG`: Path of a TOML config file (default: search for `crm.toml`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `CRM_SEED`: Start with the sample customers (default: true)
//! - `RUST_LOG`: Log filter (default: info)

use std::future::Future;
use std::io;

use tracing::{error, info, warn};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crm_backend::config::AppConfig;
use crm_backend::db;
use crm_backend::http::{create_router_with_settings, AppState};

/// Parse the configured filter, falling back to `info` and handing back the
/// parse error so it can be reported once logging is up.
fn build_filter(level: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    }
}

fn init_tracing(level: &str) {
    let (filter, rejected) = build_filter(level);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    if let Some(e) = rejected {
        warn!(filter = level, error = %e, "Invalid log filter, falling back to info");
    }
}

/// Resolve once `signal` fires. If the listener could not be installed,
/// never resolve, so the server keeps running instead of shutting down.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(error = %e, "Failed to listen for shutdown signal, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging.level);

    info!("Starting CRM HTTP Server");

    let repository = db::create_repository(&config.store);
    info!(seeded = config.store.seed, "Customer store initialized");

    let state = AppState::new(repository);
    let app = create_router_with_settings(state, &config.server);

    let addr = config.socket_addr()?;
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await?;

    Ok(())
}
