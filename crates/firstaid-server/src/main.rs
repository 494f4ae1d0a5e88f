//! HTTP server entry point.
//!
//! Loads configuration, builds the inference proxy, and serves the router
//! until Ctrl-C.

use std::sync::Arc;

use anyhow::Result;
use firstaid_config::ServerConfig;
use firstaid_llm::InferenceProxy;
use firstaid_server::{router, ServerState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    info!(
        "Inference endpoint: {} (model: {}, timeout: {}s)",
        config.proxy.endpoint,
        config.proxy.model,
        config.proxy.timeout.as_secs()
    );

    let proxy = InferenceProxy::new(config.proxy)?;
    let state = Arc::new(ServerState::new(Arc::new(proxy)));
    let app = router(state);

    info!("Starting server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
