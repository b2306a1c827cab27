//! CLI command implementations
//!
//! `serve` is the long-running mode: load configuration, initialize logging,
//! connect the page store, run the HTTP server on a blocking runtime.
//! `check-store` does the connect and ping, reports, and exits.

use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::http_server::HttpServer;
use crate::store::{MemoryPageStore, MongoPageStore, PageStore};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    // A .env file is optional; the environment wins where both define a key.
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { address, port } => serve(address, port),
        Command::CheckStore => check_store(),
    }
}

/// Start the HTTP server
///
/// Flags override the environment-provided bind address and port.
pub fn serve(address: Option<String>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::from_env()?;
    if let Some(address) = address {
        config.address = address;
    }
    if let Some(port) = port {
        config.port = port;
    }

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Boot(format!("Failed to create tokio runtime: {e}")))?;

    rt.block_on(async {
        let store = connect_store(&config).await?;
        let server = HttpServer::new(config, store);

        server
            .start()
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    })
}

/// Connect to the configured page store, ping it, and exit
pub fn check_store() -> CliResult<()> {
    let config = Config::from_env()?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Boot(format!("Failed to create tokio runtime: {e}")))?;

    rt.block_on(async {
        let store = connect_store(&config).await?;
        store
            .ping()
            .await
            .map_err(|e| CliError::Store(e.to_string()))?;

        println!(
            "store ok ({} backend, database {})",
            config.store.backend, config.store.database
        );
        Ok(())
    })
}

/// Build the configured store backend
async fn connect_store(config: &Config) -> CliResult<Arc<dyn PageStore>> {
    match config.store.backend {
        StoreBackend::Mongo => {
            let store = MongoPageStore::connect(&config.store)
                .await
                .map_err(|e| CliError::Store(e.to_string()))?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store; pages vanish on exit");
            Ok(Arc::new(MemoryPageStore::new()))
        }
    }
}
