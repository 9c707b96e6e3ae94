//! IPFS HTTP API listing implementation

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::package::error::ListingError;
use crate::package::listing::Listing;
use crate::package::types::ListingEntry;

/// Response from `/api/v0/ls`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsResponse {
    #[serde(default)]
    objects: Vec<LsObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsObject {
    #[serde(default)]
    links: Vec<LsLink>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsLink {
    name: String,
    hash: String,
}

/// Error body returned by the IPFS API on failure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ApiErrorResponse {
    message: String,
}

/// Listing implementation backed by the IPFS HTTP API.
///
/// A repository identifier is an IPNS name; its directory is listed with
/// `ls /ipns/<repository>`.
#[derive(Clone)]
pub struct IpfsListing {
    client: reqwest::Client,
    ls_url: Url,
}

impl IpfsListing {
    /// Creates a new IpfsListing for the API at `api_url`
    pub fn new(api_url: &Url, timeout: Duration) -> Result<Self, ListingError> {
        let client = reqwest::Client::builder()
            .user_agent("semver-gateway")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            ls_url: api_url.join("api/v0/ls")?,
        })
    }

    fn request_url(&self, repository: &str) -> Url {
        let mut url = self.ls_url.clone();
        url.query_pairs_mut()
            .append_pair("arg", &format!("/ipns/{repository}"));
        url
    }
}

#[async_trait::async_trait]
impl Listing for IpfsListing {
    async fn list(&self, repository: &str) -> Result<Vec<ListingEntry>, ListingError> {
        let url = self.request_url(repository);
        debug!(%url, "listing repository");

        let response = self.client.post(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ApiErrorResponse>().await {
                Ok(body) => body.message,
                Err(_) => format!("Unexpected status: {status}"),
            };
            warn!("IPFS API returned status {}: {}", status, message);
            return Err(ListingError::InvalidResponse(message));
        }

        let listing: LsResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse IPFS ls response: {}", e);
            ListingError::InvalidResponse(e.to_string())
        })?;

        Ok(listing
            .objects
            .into_iter()
            .flat_map(|object| object.links)
            .map(|link| ListingEntry::new(link.name, link.hash))
            .collect())
    }
}
