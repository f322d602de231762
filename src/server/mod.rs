//! HTTP surface for the two forwarding chains
//!
//! Exposes both chains behind plain GET endpoints so external load drivers
//! can exercise them end to end. The response body is the same constant the
//! chains always produce.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, routing::get, Router};
use tracing::info;

use crate::chain::{ForwardingChain, ForwardingMode};
use crate::config::BenchConfig;
use crate::utils::Result;

/// Shared server state: one chain per forwarding mode
#[derive(Clone)]
pub struct AppState {
    standard: Arc<ForwardingChain>,
    optimized: Arc<ForwardingChain>,
}

impl AppState {
    /// Build both chains with the same shape
    pub fn new(depth: usize, delay: Duration) -> Self {
        Self {
            standard: Arc::new(ForwardingChain::new(ForwardingMode::Standard, depth, delay)),
            optimized: Arc::new(ForwardingChain::new(
                ForwardingMode::Optimized,
                depth,
                delay,
            )),
        }
    }
}

/// Build the product router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/products/standard", get(get_product_standard))
        .route("/products/optimized", get(get_product_optimized))
        .with_state(state)
}

async fn get_product_standard(State(state): State<AppState>) -> String {
    state.standard.fetch().await
}

async fn get_product_optimized(State(state): State<AppState>) -> String {
    state.optimized.fetch().await
}

/// Serve the product endpoints until ctrl-c
pub async fn serve(config: &BenchConfig) -> Result<()> {
    let state = AppState::new(config.depth, config.delay());
    let app = router(state);

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
}
