//! Listing trait and listing parser

#[cfg(test)]
use mockall::automock;

use semver::Version;

use crate::package::error::{ListingError, ParseError};
use crate::package::types::{ListingEntry, PackageVersion, PackageVersionSet};

/// Archive suffix of published package tarballs
const ARCHIVE_SUFFIX: &str = ".tgz";

/// Trait for fetching the directory listing of a package repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Listing: Send + Sync {
    /// Lists every entry of a repository snapshot
    ///
    /// # Arguments
    /// * `repository` - Repository identifier (an IPNS name for IPFS)
    ///
    /// # Returns
    /// * `Ok(Vec<ListingEntry>)` - All entries, in no particular order
    /// * `Err(ListingError)` - If the listing cannot be fetched
    async fn list(&self, repository: &str) -> Result<Vec<ListingEntry>, ListingError>;
}

/// Collect the versions of `target_name` from a raw listing.
///
/// Entries are named `<name>@<version>.tgz`; entries of other packages are
/// ignored. A matching entry whose version is not valid semver fails the
/// whole parse.
pub fn parse_listing(
    entries: &[ListingEntry],
    target_name: &str,
) -> Result<PackageVersionSet, ParseError> {
    let prefix = format!("{target_name}@");
    let mut set = PackageVersionSet::new(target_name);

    for entry in entries {
        let Some(rest) = entry.name.strip_prefix(&prefix) else {
            continue;
        };

        let version_string = rest.strip_suffix(ARCHIVE_SUFFIX).unwrap_or(rest);
        let version =
            Version::parse(version_string).map_err(|source| ParseError::InvalidVersion {
                entry: entry.name.clone(),
                version: version_string.to_string(),
                source,
            })?;

        set.push(PackageVersion::new(
            target_name,
            version_string,
            version,
            entry.content_address.clone(),
        ));
    }

    Ok(set)
}
