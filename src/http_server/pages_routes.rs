//! Pages API Routes
//!
//! The five endpoints under `/api`: page create, read-all and partial
//! update, plus the map display pass-through pair. Handlers own the DTO
//! conversions and status mapping; storage goes through the injected
//! [`PageStore`].

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::model::{MapDisplayConfig, Page, PageContent, PagePatch};
use crate::store::PageStore;

use super::errors::ApiResult;

// ==================
// Shared State
// ==================

/// State shared across page handlers
#[derive(Clone)]
pub struct PagesState {
    pub store: Arc<dyn PageStore>,
}

impl PagesState {
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }
}

// ==================
// Request Types
// ==================

/// Partial update addressed by page id. The patch fields sit flat beside
/// the id on the wire, exactly like a page body with an `id` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePageRequest {
    pub id: String,

    #[serde(flatten)]
    pub patch: PagePatch,
}

// ==================
// Pages Routes
// ==================

/// Create the /api routes
pub fn api_routes(state: PagesState) -> Router {
    Router::new()
        .route("/post-general-data", post(post_general_data_handler))
        .route("/post-pages-data", post(post_pages_data_handler))
        .route("/get-general-data", get(get_general_data_handler))
        .route("/get-pages-data", get(get_pages_data_handler))
        .route("/update-page-data", patch(update_page_data_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// POST /api/post-pages-data
///
/// Insert a new page. Responds 201 with the stored page, id included.
async fn post_pages_data_handler(
    State(state): State<PagesState>,
    body: Result<Json<PageContent>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Page>)> {
    let Json(content) = body?;

    let id = state.store.insert_page(&content).await?;
    tracing::debug!("created page {id}");

    Ok((StatusCode::CREATED, Json(Page { id, content })))
}

/// GET /api/get-pages-data
///
/// Read every stored page as a bare JSON array.
async fn get_pages_data_handler(State(state): State<PagesState>) -> ApiResult<Json<Vec<Page>>> {
    let pages = state.store.all_pages().await?;
    Ok(Json(pages))
}

/// PATCH /api/update-page-data
///
/// Merge the supplied fields into the addressed page and echo the payload.
async fn update_page_data_handler(
    State(state): State<PagesState>,
    body: Result<Json<UpdatePageRequest>, JsonRejection>,
) -> ApiResult<Json<UpdatePageRequest>> {
    let Json(request) = body?;

    let fields = request.patch.to_field_set();
    state.store.apply_update(&request.id, &fields).await?;
    tracing::debug!("updated page {} ({} fields)", request.id, fields.len());

    Ok(Json(request))
}

/// POST /api/post-general-data
///
/// Accept map display settings and echo them back. Nothing is persisted.
async fn post_general_data_handler(
    body: Result<Json<MapDisplayConfig>, JsonRejection>,
) -> ApiResult<Json<MapDisplayConfig>> {
    let Json(config) = body?;
    Ok(Json(config))
}

/// GET /api/get-general-data
///
/// Display settings have no stored counterpart to read, so this answers an
/// explicit 204 rather than an empty 200.
async fn get_general_data_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}
