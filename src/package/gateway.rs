//! Package request orchestration
//!
//! Ties a listing collaborator to the resolver and turns the winning
//! content address into a gateway location.

use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use crate::package::error::GatewayError;
use crate::package::listing::{Listing, parse_listing};
use crate::package::range::VersionRange;
use crate::package::resolver::resolve_range;

/// Outcome of a successful package request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Version string of the selected entry
    pub version_string: String,
    pub content_address: String,
    /// Absolute gateway URL of the artifact
    pub location: Url,
}

/// Resolves package requests against a listing and a content gateway
pub struct PackageGateway {
    listing: Arc<dyn Listing>,
    gateway_url: Url,
}

impl PackageGateway {
    pub fn new(listing: Arc<dyn Listing>, gateway_url: Url) -> Self {
        Self {
            listing,
            gateway_url,
        }
    }

    pub fn gateway_url(&self) -> &Url {
        &self.gateway_url
    }

    /// Find the best version of `name` in `repository` for `range_expr`.
    ///
    /// A malformed range fails before the listing is fetched. The listing is
    /// fetched once per call and nothing is kept between calls.
    pub async fn locate(
        &self,
        repository: &str,
        name: &str,
        range_expr: &str,
    ) -> Result<Resolution, GatewayError> {
        let range = VersionRange::parse(range_expr)?;

        let entries = self.listing.list(repository).await?;
        let versions = parse_listing(&entries, name)?;
        debug!(
            repository,
            name,
            entries = entries.len(),
            versions = versions.len(),
            "parsed listing"
        );

        let selected = resolve_range(&versions, &range)?;

        let location = self.artifact_url(selected.content_address())?;
        info!(
            name,
            spec = range_expr,
            version = selected.version_string(),
            "serving package"
        );

        Ok(Resolution {
            version_string: selected.version_string().to_string(),
            content_address: selected.content_address().to_string(),
            location,
        })
    }

    /// Gateway URL of an artifact: `ipfs/<content address>` resolved against
    /// the gateway base
    pub fn artifact_url(&self, content_address: &str) -> Result<Url, GatewayError> {
        Ok(self.gateway_url.join(&format!("ipfs/{content_address}"))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::error::{ListingError, ParseError, ResolveError};
    use crate::package::listing::MockListing;
    use crate::package::types::ListingEntry;
    use mockall::predicate::eq;
    use rstest::rstest;

    fn gateway_with(listing: MockListing) -> PackageGateway {
        PackageGateway::new(
            Arc::new(listing),
            Url::parse("http://127.0.0.1:8080").unwrap(),
        )
    }

    fn listing_returning(entries: Vec<(&'static str, &'static str)>) -> MockListing {
        let mut listing = MockListing::new();
        listing
            .expect_list()
            .with(eq("registry"))
            .times(1)
            .returning(move |_| {
                Ok(entries
                    .iter()
                    .map(|(name, hash)| ListingEntry::new(*name, *hash))
                    .collect())
            });
        listing
    }

    #[tokio::test]
    async fn locate_redirects_to_highest_matching_version() {
        let gateway = gateway_with(listing_returning(vec![
            ("foo@1.0.0.tgz", "QmOne"),
            ("foo@1.2.0.tgz", "QmOneTwo"),
            ("foo@2.0.0.tgz", "QmTwo"),
            ("bar@1.5.0.tgz", "QmBar"),
        ]));

        let resolution = gateway.locate("registry", "foo", "^1.0.0").await.unwrap();

        assert_eq!(resolution.version_string, "1.2.0");
        assert_eq!(resolution.content_address, "QmOneTwo");
        assert_eq!(
            resolution.location.as_str(),
            "http://127.0.0.1:8080/ipfs/QmOneTwo"
        );
    }

    #[tokio::test]
    async fn locate_with_malformed_range_never_lists() {
        let mut listing = MockListing::new();
        listing.expect_list().never();
        let gateway = gateway_with(listing);

        let result = gateway.locate("registry", "foo", "not a valid range!!").await;

        assert!(matches!(result, Err(GatewayError::Range(_))));
    }

    #[tokio::test]
    async fn locate_without_match_is_no_match() {
        let gateway = gateway_with(listing_returning(vec![("foo@1.0.0.tgz", "QmOne")]));

        let result = gateway.locate("registry", "foo", "^2.0.0").await;

        match result {
            Err(err @ GatewayError::Resolve(ResolveError::NoMatch { .. })) => {
                assert!(err.is_client_error());
                assert_eq!(err.to_string(), "No version of foo satisfies ^2.0.0");
            }
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn locate_fails_on_corrupt_listing() {
        let gateway = gateway_with(listing_returning(vec![
            ("foo@1.0.0.tgz", "QmOne"),
            ("foo@not-a-version.tgz", "QmBad"),
        ]));

        let result = gateway.locate("registry", "foo", "*").await;

        assert!(matches!(
            result,
            Err(GatewayError::Parse(ParseError::InvalidVersion { .. }))
        ));
    }

    #[tokio::test]
    async fn locate_propagates_listing_errors() {
        let mut listing = MockListing::new();
        listing
            .expect_list()
            .returning(|_| Err(ListingError::InvalidResponse("boom".to_string())));
        let gateway = gateway_with(listing);

        let result = gateway.locate("registry", "foo", "*").await;

        match result {
            Err(err @ GatewayError::Listing(_)) => assert!(!err.is_client_error()),
            other => panic!("expected Listing error, got {other:?}"),
        }
    }

    #[rstest]
    #[case("http://127.0.0.1:8080", "http://127.0.0.1:8080/ipfs/QmHash")]
    #[case("http://gw.example/", "http://gw.example/ipfs/QmHash")]
    #[case("https://gw.example/base/", "https://gw.example/base/ipfs/QmHash")]
    #[case("https://gw.example/base", "https://gw.example/ipfs/QmHash")]
    fn artifact_url_resolves_against_gateway_base(#[case] base: &str, #[case] expected: &str) {
        let gateway = PackageGateway::new(
            Arc::new(MockListing::new()),
            Url::parse(base).unwrap(),
        );

        assert_eq!(gateway.artifact_url("QmHash").unwrap().as_str(), expected);
    }
}
