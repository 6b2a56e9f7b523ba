//! ShareIt Gateway
//!
//! Validates incoming requests and forwards the valid ones to the server.

use std::net::SocketAddr;

use shareit::{
    config::AppConfig,
    gateway::{self, GatewayState},
    logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let _log_guard = logging::init(&config.logging);

    tracing::info!("Starting ShareIt Gateway v{}", env!("CARGO_PKG_VERSION"));

    let addr = SocketAddr::new(config.gateway.host.parse()?, config.gateway.port);
    tracing::info!("Forwarding to {}", config.gateway.server_url);

    let state = GatewayState::new(config)?;
    let app = gateway::create_router(state);

    tracing::info!("Gateway listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
