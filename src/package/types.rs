use semver::Version;

use crate::package::range::VersionRange;
use crate::package::semver::cmp_descending;

/// A single entry of a repository directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// Entry name, e.g. `lodash@4.17.21.tgz`
    pub name: String,
    /// Content address of the entry in the backing store
    pub content_address: String,
}

impl ListingEntry {
    pub fn new(name: impl Into<String>, content_address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_address: content_address.into(),
        }
    }
}

/// One published version of a package, as found in a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion {
    name: String,
    version_string: String,
    version: Version,
    content_address: String,
}

impl PackageVersion {
    pub fn new(
        name: impl Into<String>,
        version_string: impl Into<String>,
        version: Version,
        content_address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version_string: version_string.into(),
            version,
            content_address: content_address.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The version exactly as it appeared in the entry name
    pub fn version_string(&self) -> &str {
        &self.version_string
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn content_address(&self) -> &str {
        &self.content_address
    }
}

/// All versions of one package within one repository snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersionSet {
    name: String,
    versions: Vec<PackageVersion>,
}

impl PackageVersionSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            versions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackageVersion> {
        self.versions.iter()
    }

    /// Adds a version to the set.
    ///
    /// Versions of other packages are rejected so that every element shares
    /// the set's name. Returns whether the version was added.
    pub fn push(&mut self, version: PackageVersion) -> bool {
        if version.name != self.name {
            return false;
        }
        self.versions.push(version);
        true
    }

    /// Returns the versions ordered from highest to lowest precedence.
    ///
    /// The set itself is left untouched.
    pub fn sorted_descending(&self) -> Vec<&PackageVersion> {
        let mut sorted: Vec<&PackageVersion> = self.versions.iter().collect();
        sorted.sort_by(|a, b| cmp_descending(a, b));
        sorted
    }

    /// Highest version satisfying `range`, if any
    pub fn resolve(&self, range: &VersionRange) -> Option<&PackageVersion> {
        self.sorted_descending()
            .into_iter()
            .find(|pv| range.satisfies(pv.version()))
    }
}
