//! Axum router configuration
//!
//! ```text
//! /
//! ├── /health              - Liveness check
//! └── /{repo}/{name}@{spec} - Redirect to the best matching artifact
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::http::handlers::{health, package_redirect};
use crate::package::gateway::PackageGateway;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<PackageGateway>,
}

impl AppState {
    pub fn new(gateway: PackageGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    pub fn gateway(&self) -> &PackageGateway {
        &self.gateway
    }
}

/// Build the complete router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/{repo}/{package}", get(package_redirect))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Log every request with its status and latency
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = millis(started.elapsed()),
        "request completed"
    );

    response
}

/// Whole milliseconds, saturating at `u64::MAX`
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
