use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info};

use crate::package::error::{GatewayError, ResolveError};

/// Failure of an HTTP request
#[derive(Debug)]
pub enum HttpError {
    /// The path does not name a package request
    NotFound,
    Gateway(GatewayError),
}

impl From<GatewayError> for HttpError {
    fn from(err: GatewayError) -> Self {
        HttpError::Gateway(err)
    }
}

/// HTTP status for a gateway failure.
///
/// Bad ranges and missing versions are the caller's problem; a broken
/// listing or unreachable IPFS node is a backend failure.
pub fn status_for(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::Range(_) | GatewayError::Resolve(ResolveError::RangeSyntax(_)) => {
            StatusCode::BAD_REQUEST
        }
        GatewayError::Resolve(ResolveError::NoMatch { .. }) => StatusCode::NOT_FOUND,
        GatewayError::Parse(_) | GatewayError::Listing(_) => StatusCode::BAD_GATEWAY,
        GatewayError::Location(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            HttpError::NotFound => (StatusCode::NOT_FOUND, None),
            HttpError::Gateway(err) => {
                let status = status_for(err);
                if err.is_client_error() {
                    info!(%status, "{}", err);
                } else {
                    error!(%status, "{}", err);
                }
                (status, Some(err.to_string()))
            }
        };

        let reason = status.canonical_reason().unwrap_or("Error");
        let body = match detail {
            Some(detail) => format!("{reason}: {detail}\n"),
            None => format!("{reason}\n"),
        };

        (status, body).into_response()
    }
}
