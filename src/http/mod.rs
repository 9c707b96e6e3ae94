//! HTTP layer
//!
//! Exposes the package gateway over HTTP.
//!
//! # Modules
//!
//! - [`router`]: Route table, shared state and request logging
//! - [`handlers`]: Package redirect and health handlers
//! - [`error`]: Mapping of gateway failures to HTTP responses
//! - [`server`]: Listener setup and lifecycle

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use router::{AppState, build_router};
pub use server::serve;
