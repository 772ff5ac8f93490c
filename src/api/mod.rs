// API module for the provider-update HTTP server
// Validates query parameters and rewrites one media row's provider URL

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod params;
pub mod routes;
pub mod server;

pub use error::UpdateError;
pub use server::ApiServer;
