//! Listing test utilities

use std::collections::HashMap;

use async_trait::async_trait;

use semver_gateway::package::error::ListingError;
use semver_gateway::package::listing::Listing;
use semver_gateway::package::types::ListingEntry;

/// In-memory listing for testing
#[derive(Default)]
pub struct InMemoryListing {
    repositories: HashMap<String, Vec<ListingEntry>>,
}

impl InMemoryListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, repository: &str, entries: Vec<(&str, &str)>) -> Self {
        self.repositories.insert(
            repository.to_string(),
            entries
                .into_iter()
                .map(|(name, hash)| ListingEntry::new(name, hash))
                .collect(),
        );
        self
    }
}

#[async_trait]
impl Listing for InMemoryListing {
    async fn list(&self, repository: &str) -> Result<Vec<ListingEntry>, ListingError> {
        self.repositories
            .get(repository)
            .cloned()
            .ok_or_else(|| ListingError::InvalidResponse(format!("unknown repository {repository}")))
    }
}
