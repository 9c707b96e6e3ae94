//! Range resolution over a package's versions

use crate::package::error::ResolveError;
use crate::package::range::VersionRange;
use crate::package::types::{PackageVersion, PackageVersionSet};

/// Select the highest version of `set` satisfying `range_expr`.
///
/// The range is parsed before any ordering work, so a malformed expression
/// fails even for an empty set. The returned version's
/// [`content_address`](PackageVersion::content_address) is the artifact to
/// serve.
pub fn resolve<'a>(
    set: &'a PackageVersionSet,
    range_expr: &str,
) -> Result<&'a PackageVersion, ResolveError> {
    let range = VersionRange::parse(range_expr)?;
    resolve_range(set, &range)
}

/// Select the highest version of `set` satisfying an already parsed range.
pub fn resolve_range<'a>(
    set: &'a PackageVersionSet,
    range: &VersionRange,
) -> Result<&'a PackageVersion, ResolveError> {
    set.resolve(range).ok_or_else(|| ResolveError::NoMatch {
        name: set.name().to_string(),
        range: range.expression().to_string(),
    })
}
