//! Site Routes
//!
//! The templated root page and the health check.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::store::PageStore;

/// Root page template, embedded at compile time
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// State shared across site handlers
#[derive(Clone)]
pub struct SiteState {
    pub site_title: String,
    pub store: Arc<dyn PageStore>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create the site routes
pub fn site_routes(state: SiteState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Root page handler
async fn index_handler(State(state): State<SiteState>) -> Html<String> {
    Html(INDEX_TEMPLATE.replace("{{title}}", &state.site_title))
}

/// Health check handler. Reports whether the page store answers a ping.
async fn health_handler(State(state): State<SiteState>) -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION").to_string();

    match state.store.ping().await {
        Ok(()) => {
            let response = HealthResponse {
                status: "ok".to_string(),
                version,
            };
            (StatusCode::OK, Json(response))
        }
        Err(err) => {
            tracing::error!("store ping failed: {err}");
            let response = HealthResponse {
                status: "unavailable".to_string(),
                version,
            };
            (StatusCode::SERVICE_UNAVAILABLE, Json(response))
        }
    }
}
