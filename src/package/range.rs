//! Version range expressions
//!
//! Supports npm-style range syntax:
//! - `1.2.3`, `=1.2.3` - exact match
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0, special cases for 0.x)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1.2.x`, `1.x`, `1`, `*`, empty - wildcards
//! - `1.0.0 - 2.0.0` - inclusive hyphen range
//! - `>=1.0.0 <2.0.0` - space-separated AND
//! - `^1.0.0 || ^2.0.0` - OR
//!
//! Every expression is lowered into comparator sets; a version satisfies the
//! range when it satisfies every comparator of at least one set.

use std::cmp::Ordering;

use semver::{BuildMetadata, Prerelease, Version};

use crate::package::error::RangeSyntaxError;
use crate::package::semver::cmp_precedence;

/// A parsed range expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    expression: String,
    alternatives: Vec<ComparatorSet>,
}

/// Comparators that must all hold (space-separated AND)
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComparatorSet(Vec<Comparator>);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// A version that may leave trailing components unspecified (`1`, `1.2`, `1.x`)
#[derive(Debug, Clone, PartialEq, Eq)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl VersionRange {
    /// Parse a range expression.
    ///
    /// Fails on the first token that is not valid range syntax.
    pub fn parse(expression: &str) -> Result<Self, RangeSyntaxError> {
        let alternatives = expression
            .split("||")
            .map(|part| ComparatorSet::parse(part).map_err(|r| RangeSyntaxError::new(expression, r)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            expression: expression.to_string(),
            alternatives,
        })
    }

    /// The expression as it was written
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Check if a version satisfies this range
    pub fn satisfies(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|set| set.satisfies(version))
    }
}

impl ComparatorSet {
    fn parse(spec: &str) -> Result<Self, String> {
        let tokens = tokenize(spec)?;

        // Hyphen range: "A - B"
        if let [from, dash, to] = tokens.as_slice()
            && dash == "-"
        {
            return Self::parse_hyphen(from, to);
        }

        if tokens.iter().any(|t| t == "-") {
            return Err("hyphen ranges take exactly one version on each side".to_string());
        }

        let mut comparators = Vec::new();
        for token in &tokens {
            comparators.extend(parse_comparator(token)?);
        }

        Ok(Self(comparators))
    }

    fn parse_hyphen(from: &str, to: &str) -> Result<Self, String> {
        let from = Partial::parse(from)?;
        let to = Partial::parse(to)?;
        let mut comparators = Vec::new();

        if from.major.is_some() {
            comparators.push(Comparator::new(Op::Gte, from.floor()));
        }

        // A partial upper bound covers its whole X-range: "1.0.0 - 2" is <3.0.0
        if to.is_complete() {
            comparators.push(Comparator::new(Op::Lte, to.floor()));
        } else if let Some(ceiling) = to.ceiling() {
            comparators.push(Comparator::new(Op::Lt, ceiling));
        }

        Ok(Self(comparators))
    }

    fn satisfies(&self, version: &Version) -> bool {
        if !self.0.iter().all(|c| c.matches(version)) {
            return false;
        }

        if version.pre.is_empty() {
            return true;
        }

        // Pre-releases only match when a comparator opts into the same
        // major.minor.patch with a pre-release of its own.
        self.0.iter().any(|c| {
            !c.version.pre.is_empty()
                && c.version.major == version.major
                && c.version.minor == version.minor
                && c.version.patch == version.patch
        })
    }
}

impl Comparator {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    /// A comparator no version can satisfy
    fn nothing() -> Self {
        Self::new(Op::Lt, Version::new(0, 0, 0))
    }

    fn matches(&self, version: &Version) -> bool {
        let ordering = cmp_precedence(version, &self.version);
        match self.op {
            Op::Eq => ordering == Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
        }
    }
}

/// Split a comparator set on whitespace, gluing detached operators
/// (`>= 1.2.3`) onto the version that follows them.
fn tokenize(spec: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut pending_op: Option<&str> = None;

    for word in spec.split_whitespace() {
        if let Some(op) = pending_op.take() {
            tokens.push(format!("{op}{word}"));
        } else if matches!(word, ">" | ">=" | "<" | "<=" | "=" | "^" | "~") {
            pending_op = Some(word);
        } else {
            tokens.push(word.to_string());
        }
    }

    match pending_op {
        Some(op) => Err(format!("operator {op:?} is missing a version")),
        None => Ok(tokens),
    }
}

fn parse_comparator(token: &str) -> Result<Vec<Comparator>, String> {
    let (op, rest) = split_operator(token);
    let partial = Partial::parse(rest)?;

    let comparators = match op {
        "^" => caret(&partial),
        "~" => tilde(&partial),
        ">" => match partial.major {
            None => vec![Comparator::nothing()],
            Some(_) if partial.is_complete() => vec![Comparator::new(Op::Gt, partial.floor())],
            Some(_) => match partial.ceiling() {
                Some(ceiling) => vec![Comparator::new(Op::Gte, ceiling)],
                None => vec![Comparator::nothing()],
            },
        },
        ">=" => match partial.major {
            None => vec![],
            Some(_) => vec![Comparator::new(Op::Gte, partial.floor())],
        },
        "<" => match partial.major {
            None => vec![Comparator::nothing()],
            Some(_) => vec![Comparator::new(Op::Lt, partial.floor())],
        },
        "<=" => match partial.major {
            None => vec![],
            Some(_) if partial.is_complete() => vec![Comparator::new(Op::Lte, partial.floor())],
            Some(_) => below(partial.ceiling()).into_iter().collect(),
        },
        _ => x_range(&partial),
    };

    Ok(comparators)
}

fn split_operator(token: &str) -> (&str, &str) {
    for op in [">=", "<=", ">", "<", "=", "^", "~"] {
        if let Some(rest) = token.strip_prefix(op) {
            return (op, rest);
        }
    }
    ("", token)
}

/// `1.2.3` is exact, `1.2` / `1.2.x` is >=1.2.0 <1.3.0, `*` matches anything
fn x_range(partial: &Partial) -> Vec<Comparator> {
    if partial.is_complete() {
        return vec![Comparator::new(Op::Eq, partial.floor())];
    }
    if partial.major.is_none() {
        return vec![];
    }

    let mut comparators = vec![Comparator::new(Op::Gte, partial.floor())];
    comparators.extend(below(partial.ceiling()));
    comparators
}

/// ^1.2.3 -> >=1.2.3 <2.0.0
/// ^0.2.3 -> >=0.2.3 <0.3.0
/// ^0.0.3 -> >=0.0.3 <0.0.4
fn caret(partial: &Partial) -> Vec<Comparator> {
    let Some(major) = partial.major else {
        return vec![];
    };

    let upper = match (major, partial.minor, partial.patch) {
        (0, Some(0), Some(patch)) => next_patch(0, 0, patch),
        (0, Some(minor), _) => next_minor(0, minor),
        (major, _, _) => next_major(major),
    };

    let mut comparators = vec![Comparator::new(Op::Gte, partial.floor())];
    comparators.extend(below(upper));
    comparators
}

/// ~1.2.3 -> >=1.2.3 <1.3.0, ~1 -> >=1.0.0 <2.0.0
fn tilde(partial: &Partial) -> Vec<Comparator> {
    let Some(major) = partial.major else {
        return vec![];
    };

    let upper = match partial.minor {
        Some(minor) => next_minor(major, minor),
        None => next_major(major),
    };

    let mut comparators = vec![Comparator::new(Op::Gte, partial.floor())];
    comparators.extend(below(upper));
    comparators
}

/// Exclusive upper bound; `None` means no version lies past the range
fn below(upper: Option<Version>) -> Option<Comparator> {
    upper.map(|version| Comparator::new(Op::Lt, version))
}

// Version bumps carry into the next component when a number is already
// u64::MAX, and give `None` once every component is exhausted.

fn next_major(major: u64) -> Option<Version> {
    major.checked_add(1).map(|major| Version::new(major, 0, 0))
}

fn next_minor(major: u64, minor: u64) -> Option<Version> {
    match minor.checked_add(1) {
        Some(minor) => Some(Version::new(major, minor, 0)),
        None => next_major(major),
    }
}

fn next_patch(major: u64, minor: u64, patch: u64) -> Option<Version> {
    match patch.checked_add(1) {
        Some(patch) => Some(Version::new(major, minor, patch)),
        None => next_minor(major, minor),
    }
}

impl Partial {
    fn parse(input: &str) -> Result<Self, String> {
        let input = input.strip_prefix('v').unwrap_or(input);
        if input.is_empty() {
            return Err("missing version".to_string());
        }

        // Build metadata never affects matching
        let input = input.split_once('+').map_or(input, |(core, _)| core);
        let (core, pre) = match input.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (input, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return Err(format!("too many components in {input:?}"));
        }

        let mut numbers = [None; 3];
        let mut wildcard_seen = false;
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if matches!(*part, "x" | "X" | "*") {
                wildcard_seen = true;
                continue;
            }
            if wildcard_seen {
                return Err(format!("number after wildcard in {input:?}"));
            }
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format!("{part:?} is not a version number"));
            }
            *slot = Some(
                part.parse::<u64>()
                    .map_err(|e| format!("{part:?} is not a version number: {e}"))?,
            );
        }

        let [major, minor, patch] = numbers;
        let pre = match pre {
            Some(_) if patch.is_none() => {
                return Err(format!("pre-release on a partial version in {input:?}"));
            }
            Some(pre) => Prerelease::new(pre).map_err(|e| e.to_string())?,
            None => Prerelease::EMPTY,
        };

        Ok(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    fn is_complete(&self) -> bool {
        self.patch.is_some()
    }

    /// Lowest version covered, missing components as zero
    fn floor(&self) -> Version {
        Version {
            major: self.major.unwrap_or(0),
            minor: self.minor.unwrap_or(0),
            patch: self.patch.unwrap_or(0),
            pre: self.pre.clone(),
            build: BuildMetadata::EMPTY,
        }
    }

    /// First version past the X-range: `1` -> 2.0.0, `1.2` -> 1.3.0.
    ///
    /// `None` for `*` and for ranges that reach the largest representable
    /// version.
    fn ceiling(&self) -> Option<Version> {
        match (self.major, self.minor) {
            (Some(major), None) => next_major(major),
            (Some(major), Some(minor)) => next_minor(major, minor),
            _ => None,
        }
    }
}
