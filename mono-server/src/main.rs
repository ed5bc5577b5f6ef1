//! Monobility Server
//!
//! Ride dashboard backend with wheel simulation, tour recording and REST API

use anyhow::Result;
use mono_server::{api, config, manager, state};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Monobility Server");

    let config = config::ServerConfig::from_env();
    let addr = config.addr;
    if config.gemini.api_key.is_none() {
        info!("GEMINI_API_KEY not set, advice proxy disabled");
    }

    // Create application state
    let state = state::AppState::new(config);

    // Build the router
    let app = api::create_router(state.clone());

    // Start telemetry loop in background
    tokio::spawn(manager::run(state.clone()));

    // Start server
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
