//! winesta-api server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use winesta_api::api;
use winesta_api::app_state::AppState;
use winesta_api::config::WinestaConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = WinestaConfig::from_env()?;
    tracing::info!(
        addr = %config.listen_addr,
        seed_demo_data = config.seed_demo_data,
        "starting winesta-api"
    );

    let app_state = AppState::from_config(&config);
    let app = api::build_app(app_state, &config);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
