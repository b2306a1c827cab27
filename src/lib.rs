//! markermap - HTTP backend for a map-marker content site
//!
//! A thin CRUD gateway between a map frontend and a document store of page
//! records, plus the site's templated root page. Requests flow router →
//! DTO decode → store operation → DTO encode; a failing request only ever
//! affects itself.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod model;
pub mod store;
