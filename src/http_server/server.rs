//! # HTTP Server
//!
//! Combines the site and API routers over an injected page store.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::PageStore;

use super::pages_routes::{api_routes, PagesState};
use super::site_routes::{site_routes, SiteState};

/// HTTP server for the map backend
pub struct HttpServer {
    config: Config,
    router: Router,
}

impl HttpServer {
    /// Create a new server over the given page store
    pub fn new(config: Config, store: Arc<dyn PageStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &Config, store: Arc<dyn PageStore>) -> Router {
        let site_state = SiteState {
            site_title: config.site_title.clone(),
            store: store.clone(),
        };
        let pages_state = PagesState::new(store);

        // Configure CORS from config
        let cors = if config.cors_origins.is_empty() {
            // No origins configured: allow any, like the original site setup
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            // Root page and health check
            .merge(site_routes(site_state))
            // Pages API under /api
            .nest("/api", api_routes(pages_state))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {e}", self.config.socket_addr()),
            )
        })?;

        tracing::info!("starting HTTP server on {addr}");
        tracing::info!("pages API at http://{addr}/api, health check at http://{addr}/health");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
