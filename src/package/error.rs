use thiserror::Error;

/// A listing entry carries a version that is not valid semver.
///
/// The store is expected to only hold well-formed entries, so this fails the
/// whole request instead of skipping the entry.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid version {version:?} in listing entry {entry:?}: {source}")]
    InvalidVersion {
        entry: String,
        version: String,
        #[source]
        source: semver::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid range expression {expression:?}: {reason}")]
pub struct RangeSyntaxError {
    pub expression: String,
    pub reason: String,
}

impl RangeSyntaxError {
    pub(crate) fn new(expression: &str, reason: impl Into<String>) -> Self {
        Self {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    RangeSyntax(#[from] RangeSyntaxError),

    #[error("No version of {name} satisfies {range}")]
    NoMatch { name: String, range: String },
}

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Every way a package request can fail.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Range(#[from] RangeSyntaxError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Listing failed: {0}")]
    Listing(#[from] ListingError),

    #[error("Invalid gateway location: {0}")]
    Location(#[from] url::ParseError),
}

impl GatewayError {
    /// Whether the failure was caused by the request rather than the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, GatewayError::Range(_) | GatewayError::Resolve(_))
    }
}
