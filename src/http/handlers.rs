use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::info;

use crate::http::error::HttpError;
use crate::http::router::AppState;

/// Split the `{name}@{spec}` path segment.
///
/// The split happens at the last `@`, so the spec itself never contains one.
/// Both halves must be non-empty.
pub fn split_package_segment(segment: &str) -> Option<(&str, &str)> {
    let (name, spec) = segment.rsplit_once('@')?;
    if name.is_empty() || spec.is_empty() {
        return None;
    }
    Some((name, spec))
}

/// `GET /{repo}/{name}@{spec}`: redirect to the best matching artifact
pub async fn package_redirect(
    State(state): State<AppState>,
    Path((repo, package)): Path<(String, String)>,
) -> Result<Response, HttpError> {
    let (name, spec) = split_package_segment(&package).ok_or(HttpError::NotFound)?;

    info!(repo = %repo, name, spec, "package request");

    let resolution = state.gateway().locate(&repo, name, spec).await?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, resolution.location.to_string())],
    )
        .into_response())
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}
