use std::cmp::Ordering;

use semver::Version;

use crate::package::types::PackageVersion;

/// Compare two versions by semver precedence.
///
/// Major, minor and patch compare numerically, then a version carrying a
/// pre-release tag sorts below the same version without one. Unlike
/// `Version`'s `Ord`, build metadata is ignored:
/// `1.0.0+build1` and `1.0.0` have equal precedence.
pub fn cmp_precedence(a: &Version, b: &Version) -> Ordering {
    a.major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}

/// Ordering used to pick the best version: highest precedence first.
///
/// Versions of equal precedence fall back to the lexical order of the
/// version string as written in the listing, so the result never depends on
/// listing order.
pub fn cmp_descending(a: &PackageVersion, b: &PackageVersion) -> Ordering {
    cmp_precedence(b.version(), a.version())
        .then_with(|| a.version_string().cmp(b.version_string()))
}
