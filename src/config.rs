//! Process Configuration
//!
//! Runtime settings loaded from the environment. Every variable has a
//! default so a bare `markermap serve` works against a local store, but a
//! malformed value fails loudly at bootstrap rather than being silently
//! replaced.

use std::time::Duration;

use thiserror::Error;
use tracing::Level;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable holds a value the config cannot use
    #[error("Invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Top-level runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind to (default: "0.0.0.0")
    pub address: String,

    /// Port to bind to (default: 8000)
    pub port: u16,

    /// Title substituted into the root page template
    pub site_title: String,

    /// Log verbosity (default: info)
    pub log_level: Level,

    /// CORS allowed origins; empty means any origin is allowed
    pub cors_origins: Vec<String>,

    /// Page store settings
    pub store: StoreConfig,
}

/// Page store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Which backend to run against (default: mongo)
    pub backend: StoreBackend,

    /// Connection string. May carry credentials, so it is never logged.
    pub uri: String,

    /// Database name (default: "googleMap")
    pub database: String,

    /// Collection holding the page documents (default: "dataPages")
    pub collection: String,

    /// Per-operation deadline in seconds (default: 10)
    pub timeout_secs: u64,
}

/// Available page store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB over the network
    Mongo,
    /// Process-local store for development and tests
    Memory,
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_site_title() -> String {
    "Main website".to_string()
}

fn default_store_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_store_database() -> String {
    "googleMap".to_string()
}

fn default_store_collection() -> String {
    "dataPages".to_string()
}

fn default_store_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            site_title: default_site_title(),
            log_level: Level::INFO,
            cors_origins: Vec::new(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Mongo,
            uri: default_store_uri(),
            database: default_store_database(),
            collection: default_store_collection(),
            timeout_secs: default_store_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let address = get_env("SERVER_ADDRESS", &default_address());
        let port = parse_env("SERVER_PORT", default_port())?;
        let site_title = get_env("SITE_TITLE", &default_site_title());

        let log_level = get_env("LOG_LEVEL", "info")
            .parse::<Level>()
            .map_err(|e| ConfigError::Invalid {
                key: "LOG_LEVEL",
                message: e.to_string(),
            })?;

        let cors_origins = get_env("CORS_ALLOWED_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            address,
            port,
            site_title,
            log_level,
            cors_origins,
            store: StoreConfig::from_env()?,
        })
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = get_env("STORE_BACKEND", "mongo")
            .parse::<StoreBackend>()
            .map_err(|message| ConfigError::Invalid {
                key: "STORE_BACKEND",
                message,
            })?;

        let timeout_secs = parse_env("STORE_TIMEOUT_SECS", default_store_timeout_secs())?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "STORE_TIMEOUT_SECS",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            backend,
            uri: get_env("STORE_URI", &default_store_uri()),
            database: get_env("STORE_DATABASE", &default_store_database()),
            collection: get_env("STORE_COLLECTION", &default_store_collection()),
            timeout_secs,
        })
    }

    /// Per-operation deadline
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!(
                "unknown store backend '{other}' (expected 'mongo' or 'memory')"
            )),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Mongo => write!(f, "mongo"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            message: format!("'{raw}' ({e})"),
        }),
        Err(_) => Ok(default),
    }
}
