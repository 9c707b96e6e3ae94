//! Server initialization and lifecycle

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::GatewayConfig;
use crate::http::router::{AppState, build_router};
use crate::package::gateway::PackageGateway;
use crate::package::listings::IpfsListing;

/// Run the gateway until Ctrl-C
pub async fn serve(config: GatewayConfig) -> anyhow::Result<()> {
    let listing = IpfsListing::new(&config.ipfs_api, config.fetch_timeout())
        .context("failed to create IPFS API client")?;
    let gateway = PackageGateway::new(Arc::new(listing), config.ipfs_gateway.clone());
    let app = build_router(AppState::new(gateway));

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        addr = %addr,
        ipfs_api = %config.ipfs_api,
        ipfs_gateway = %config.ipfs_gateway,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }
}
