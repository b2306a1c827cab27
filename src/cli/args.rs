//! CLI argument definitions using clap
//!
//! Commands:
//! - markermap serve [--address <addr>] [--port <port>]
//! - markermap check-store

use clap::{Parser, Subcommand};

/// Markermap - HTTP backend for a map-marker content site
#[derive(Parser, Debug)]
#[command(name = "markermap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Address to bind, overriding SERVER_ADDRESS
        #[arg(long)]
        address: Option<String>,

        /// Port to bind, overriding SERVER_PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Connect to the configured page store and ping it
    CheckStore,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
