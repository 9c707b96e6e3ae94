use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

// =============================================================================
// Defaults
// =============================================================================

/// Default IPFS HTTP API address
pub const DEFAULT_IPFS_API: &str = "http://127.0.0.1:5001";

/// Default IPFS gateway address used to build redirect targets
pub const DEFAULT_IPFS_GATEWAY: &str = "http://127.0.0.1:8080";

/// Default listen address
pub const DEFAULT_ADDR: &str = ":3001";

/// Timeout for listing requests in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gateway configuration
///
/// Built once at startup and handed to the server; nothing below `main`
/// reads flags or environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewayConfig {
    /// IPFS HTTP API used for directory listings
    pub ipfs_api: Url,
    /// IPFS gateway that serves resolved artifacts
    pub ipfs_gateway: Url,
    /// Address to listen on (`host:port` or `:port`)
    pub addr: String,
    /// Listing request timeout in milliseconds
    pub fetch_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            ipfs_api: default_url(DEFAULT_IPFS_API),
            ipfs_gateway: default_url(DEFAULT_IPFS_GATEWAY),
            addr: DEFAULT_ADDR.to_string(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a JSON file, using defaults for missing fields
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Socket address to bind; a bare `:port` listens on all interfaces
    pub fn listen_addr(&self) -> String {
        if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

fn default_url(url: &str) -> Url {
    // Both defaults are constant, well-formed URLs
    Url::parse(url).unwrap_or_else(|e| unreachable!("invalid default URL {url}: {e}"))
}
