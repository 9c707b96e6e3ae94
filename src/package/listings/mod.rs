//! Listing implementations for fetching repository directories

pub mod ipfs;

pub use ipfs::IpfsListing;
