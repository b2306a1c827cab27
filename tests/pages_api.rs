//! Pages API End-to-End Tests
//!
//! Drives the assembled router through tower's `oneshot` without binding a
//! socket. Covers the full HTTP surface:
//! - create / read-all / partial update with their status codes
//! - the stable JSON error bodies for bad ids, unknown pages and bad bodies
//! - the general-data pass-through pair
//! - the templated root page and the health check, store up and store down

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use markermap::config::Config;
use markermap::http_server::HttpServer;
use markermap::model::{FieldSet, Page, PageContent};
use markermap::store::{MemoryPageStore, PageStore, StoreError, StoreResult};

// =============================================================================
// Test Utilities
// =============================================================================

fn test_router() -> Router {
    let config = Config {
        site_title: "Test Map".to_string(),
        ..Default::default()
    };
    HttpServer::new(config, Arc::new(MemoryPageStore::new())).router()
}

/// Store whose every call fails, for the outage paths.
struct DownStore;

#[async_trait::async_trait]
impl PageStore for DownStore {
    async fn insert_page(&self, _content: &PageContent) -> StoreResult<String> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn all_pages(&self) -> StoreResult<Vec<Page>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn apply_update(&self, _id: &str, _fields: &FieldSet) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

fn down_router() -> Router {
    HttpServer::new(Config::default(), Arc::new(DownStore)).router()
}

fn request(method: Method, path: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(path);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and decode the response body as JSON (Null when empty).
async fn send(
    router: &Router,
    method: Method,
    path: &str,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request(method, path, body))
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Send a request and return the raw response body as text.
async fn send_raw(router: &Router, method: Method, path: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(request(method, path, None))
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn full_page_json() -> Value {
    json!({
        "href": "/fort",
        "urlImgMarker": "fort-marker.png",
        "bangalore": {"lat": 12, "lng": 77},
        "dataPopup": {
            "title": "Bangalore Fort",
            "text": "Remains of the old fort",
            "urlImg": "fort.jpg",
            "links": [
                {"url": "https://example.com/history", "name": "History"},
                {"url": "https://example.com/tickets", "name": "Tickets"}
            ]
        }
    })
}

// =============================================================================
// Create / ReadAll
// =============================================================================

#[tokio::test]
async fn test_create_then_read_back_exact_record() {
    let router = test_router();
    let payload = full_page_json();

    let (status, created) =
        send(&router, Method::POST, "/api/post-pages-data", Some(&payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    // The created body is the input plus the assigned id.
    let mut expected = payload.clone();
    expected["id"] = json!(id);
    assert_eq!(created, expected);

    // Reading everything yields exactly that record.
    let (status, listed) = send(&router, Method::GET, "/api/get-pages-data", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([expected]));
}

#[tokio::test]
async fn test_read_all_on_empty_store_is_empty_array() {
    let router = test_router();

    let (status, body) = send(&router, Method::GET, "/api/get-pages-data", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

/// An empty object is accepted and stored as zero-values; nothing validates
/// page content.
#[tokio::test]
async fn test_create_accepts_empty_object_as_zero_values() {
    let router = test_router();

    let (status, created) =
        send(&router, Method::POST, "/api/post-pages-data", Some(&json!({}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["href"], "");
    assert_eq!(created["bangalore"], json!({"lat": 0, "lng": 0}));
    assert_eq!(created["dataPopup"]["links"], json!([]));
}

// =============================================================================
// UpdateById
// =============================================================================

#[tokio::test]
async fn test_update_merges_and_echoes_the_payload() {
    let router = test_router();

    let (_, created) = send(
        &router,
        Method::POST,
        "/api/post-pages-data",
        Some(&full_page_json()),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let update = json!({"id": id, "dataPopup": {"title": "Renamed"}});
    let (status, echoed) =
        send(&router, Method::PATCH, "/api/update-page-data", Some(&update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(echoed, update);

    // Only the patched leaf changed.
    let (_, listed) = send(&router, Method::GET, "/api/get-pages-data", None).await;
    let page = &listed[0];
    assert_eq!(page["dataPopup"]["title"], "Renamed");
    assert_eq!(page["dataPopup"]["text"], "Remains of the old fort");
    assert_eq!(page["href"], "/fort");
    assert_eq!(page["bangalore"], json!({"lat": 12, "lng": 77}));
}

#[tokio::test]
async fn test_update_with_malformed_id_answers_400() {
    let router = test_router();

    let update = json!({"id": "not-an-id", "href": "/x"});
    let (status, body) =
        send(&router, Method::PATCH, "/api/update-page-data", Some(&update)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ID");
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_update_with_unknown_id_answers_404() {
    let router = test_router();

    let update = json!({"id": "0123456789abcdef01234567", "href": "/x"});
    let (status, body) =
        send(&router, Method::PATCH, "/api/update-page-data", Some(&update)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "PAGE_NOT_FOUND");
}

#[tokio::test]
async fn test_update_without_id_is_a_bind_failure() {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::PATCH,
        "/api/update-page-data",
        Some(&json!({"href": "/x"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BIND_FAILURE");
}

#[tokio::test]
async fn test_malformed_body_is_a_bind_failure() {
    let router = test_router();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/post-pages-data")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "BIND_FAILURE");
    assert_eq!(body["code"], 400);
}

// =============================================================================
// General Data Pass-Through
// =============================================================================

#[tokio::test]
async fn test_general_data_is_echoed_not_stored() {
    let router = test_router();

    let config = json!({
        "MapId": "g1",
        "Zoom": "12",
        "Lat": "12.97",
        "Lng": "77.59",
        "Size": ["32", "32"],
        "unknownKey": "dropped"
    });
    let (status, echoed) =
        send(&router, Method::POST, "/api/post-general-data", Some(&config)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(echoed["MapId"], "g1");
    assert_eq!(echoed["Lat"], "12.97");
    assert_eq!(echoed["Size"], json!(["32", "32"]));
    // Unknown keys are dropped, missing ones echo as zero-values.
    assert!(echoed.get("unknownKey").is_none());
    assert_eq!(echoed["LogoUrl"], "");

    // Nothing landed in the page collection.
    let (_, listed) = send(&router, Method::GET, "/api/get-pages-data", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_get_general_data_answers_204() {
    let router = test_router();

    let (status, body) = send(&router, Method::GET, "/api/get-general-data", None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

// =============================================================================
// Site Surface
// =============================================================================

#[tokio::test]
async fn test_root_page_substitutes_the_title() {
    let router = test_router();

    let (status, html) = send_raw(&router, Method::GET, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Test Map"));
    assert!(!html.contains("{{title}}"));
}

#[tokio::test]
async fn test_health_reports_ok() {
    let router = test_router();

    let (status, body) = send(&router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

// =============================================================================
// Store Outage
// =============================================================================

/// Store failures answer the failing request and leave the server serving.
#[tokio::test]
async fn test_store_outage_maps_to_503_per_request() {
    let router = down_router();

    let (status, body) = send(&router, Method::GET, "/api/get-pages-data", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "STORE_UNAVAILABLE");
    assert_eq!(body["code"], 503);

    let (status, _) = send(
        &router,
        Method::POST,
        "/api/post-pages-data",
        Some(&json!({"href": "/x"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    // The process keeps answering; endpoints that skip the store still work.
    let (status, body) = send(&router, Method::GET, "/api/get-general-data", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_health_reports_unavailable_when_ping_fails() {
    let router = down_router();

    let (status, body) = send(&router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
}
