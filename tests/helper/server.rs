//! HTTP server test utilities

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use url::Url;

use semver_gateway::http::{AppState, build_router};
use semver_gateway::package::gateway::PackageGateway;
use semver_gateway::package::listing::Listing;

pub const GATEWAY_URL: &str = "http://gateway.test:8080";

/// Serve the router on an ephemeral port and return its address
pub async fn spawn_gateway(listing: Arc<dyn Listing>) -> SocketAddr {
    let gateway = PackageGateway::new(listing, Url::parse(GATEWAY_URL).unwrap());
    let app = build_router(AppState::new(gateway));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// HTTP client that reports redirects instead of following them
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
