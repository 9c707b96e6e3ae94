pub mod listing;
pub mod server;
