//! CLI-specific error types
//!
//! Bootstrap failures are fatal: they print to stderr and the process exits
//! non-zero. This is the only layer where fatal handling is allowed; once
//! the server is up, failures stay per-request.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Page store could not be reached
    #[error("Store error: {0}")]
    Store(String),

    /// Runtime setup failed before serving started
    #[error("Boot failed: {0}")]
    Boot(String),

    /// HTTP server terminated with an error
    #[error("Server failed: {0}")]
    Server(String),
}
