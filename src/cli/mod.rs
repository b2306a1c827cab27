//! CLI module for markermap
//!
//! Provides the command-line interface:
//! - serve: run the HTTP server over the configured page store
//! - check-store: connectivity check against the page store

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command};
pub use errors::{CliError, CliResult};
