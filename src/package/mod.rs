//! Package resolution layer
//!
//! This module turns a repository listing into a set of package versions and
//! picks the best one for a semver range.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Listing   │────▶│   Parser    │────▶│  Resolver   │
//! │   (fetch)   │     │ (name@ver)  │     │ (best pick) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │  Listings   │                         │    Range    │
//! │   (ipfs)    │                         │ (predicate) │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`gateway`]: Request orchestration, from listing to redirect target
//! - [`listing`]: Listing trait and the listing parser
//! - [`listings`]: Concrete listing implementations (IPFS)
//! - [`range`]: Range expression parsing and matching
//! - [`resolver`]: Highest-satisfying-version selection
//! - [`semver`]: Version precedence ordering
//! - [`types`]: `PackageVersion`, `PackageVersionSet` and listing entries
//! - [`error`]: Error types for every failure a request can hit

pub mod error;
pub mod gateway;
pub mod listing;
pub mod listings;
pub mod range;
pub mod resolver;
pub mod semver;
pub mod types;
