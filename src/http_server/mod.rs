//! # HTTP Server Module
//!
//! Axum server for the map backend. Combines the pages API and the site
//! routes into one router over an injected page store.
//!
//! # Endpoints
//!
//! - `/` - Templated root page
//! - `/health` - Health check (pings the page store)
//! - `/api/*` - Pages CRUD and the map display pass-through

pub mod errors;
pub mod pages_routes;
pub mod server;
pub mod site_routes;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
