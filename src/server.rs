use std::sync::Arc;

use axum::{Router, routing::get};
use eyre::{Result, eyre};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::misc::{account_activity::ActivitySettings, explorer_client::EtherscanClient};

mod handlers;

#[derive(Clone)]
pub struct AppState {
    pub explorer: Arc<EtherscanClient>,
    pub settings: ActivitySettings,
}

impl AppState {
    pub fn new(explorer: EtherscanClient, settings: ActivitySettings) -> Self {
        Self {
            explorer: Arc::new(explorer),
            settings,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api", get(handlers::status))
        .route("/api/transactions", get(handlers::transactions))
        .route("/api/balanceAtDate", get(handlers::balance_at_date))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `host:port` and serves the API until ctrl-c.
pub async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|e| eyre!("Failed to bind to {host}:{port}. (Error: {e})"))?;

    info!(chain_id = state.explorer.chain_id(), "Server running on port {port}");
    info!("Status check: http://localhost:{port}/api");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| eyre!("Server crashed. (Error: {e})"))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
