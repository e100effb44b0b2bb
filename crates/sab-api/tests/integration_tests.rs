//! # Integration Tests for sab-api
//!
//! Drives the assembled router end to end: address listing and creation,
//! PIN code resolution, storage and directory faults, malformed bodies,
//! health probes, CORS, and the OpenAPI document.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use sab_api::config::AppConfig;
use sab_api::store::{AddressStore, MemoryAddressStore};
use sab_api::AppState;
use sab_core::{
    Address, DirectoryError, NewAddress, PinCodeDetails, PostalCodeDirectory, StorageError,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper: app over a fresh in-memory store.
fn test_app() -> axum::Router {
    sab_api::app(AppState::new())
}

/// Helper: app sharing an inspectable in-memory store.
fn test_app_with_store() -> (axum::Router, Arc<MemoryAddressStore>) {
    let store = Arc::new(MemoryAddressStore::default());
    let state = AppState::with_store(AppConfig::default(), store.clone());
    (sab_api::app(state), store)
}

/// Store whose backend is always down.
#[derive(Debug)]
struct UnreachableStore;

#[async_trait]
impl AddressStore for UnreachableStore {
    async fn list(&self) -> Result<Vec<Address>, StorageError> {
        Err(StorageError::Unavailable("connection refused".into()))
    }

    async fn create(&self, _new: NewAddress) -> Result<Address, StorageError> {
        Err(StorageError::Unavailable("connection refused".into()))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("connection refused".into()))
    }

    fn backend(&self) -> &'static str {
        "unreachable"
    }
}

/// Directory that faults on every lookup.
#[derive(Debug)]
struct BrokenDirectory;

impl PostalCodeDirectory for BrokenDirectory {
    fn resolve(&self, _code: &str) -> Result<Option<PinCodeDetails>, DirectoryError> {
        Err(DirectoryError("reference table unavailable".into()))
    }
}

fn failing_store_app() -> axum::Router {
    let state = AppState::with_store(AppConfig::default(), Arc::new(UnreachableStore));
    sab_api::app(state)
}

async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn chennai_submission() -> Value {
    json!({
        "addressLine1": "12 Anna Salai",
        "city": "Chennai",
        "state": "Tamil Nadu",
        "pinCode": "600001"
    })
}

// -- Addresses ----------------------------------------------------------------

#[tokio::test]
async fn test_list_starts_empty() {
    let response = test_app().oneshot(get("/api/addresses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_json("/api/addresses", &chennai_submission()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["addressLine1"], "12 Anna Salai");
    assert_eq!(created["city"], "Chennai");
    assert_eq!(created["state"], "Tamil Nadu");
    assert_eq!(created["country"], "India");
    assert_eq!(created["pinCode"], "600001");
    let id = created["_id"].as_str().expect("id is a string");
    assert!(!id.is_empty());

    let response = app.oneshot(get("/api/addresses")).await.unwrap();
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
}

#[tokio::test]
async fn test_create_keeps_explicit_country() {
    let mut submission = chennai_submission();
    submission["country"] = json!("Sri Lanka");
    let response = test_app()
        .oneshot(post_json("/api/addresses", &submission))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["country"], "Sri Lanka");
}

#[tokio::test]
async fn test_create_assigns_distinct_ids() {
    let app = test_app();
    let mut ids = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/api/addresses", &chennai_submission()))
            .await
            .unwrap();
        ids.push(body_json(response).await["_id"].as_str().unwrap().to_string());
    }
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_create_missing_field_is_400_and_stores_nothing() {
    let (app, store) = test_app_with_store();
    let mut submission = chennai_submission();
    submission.as_object_mut().unwrap().remove("city");

    let response = app
        .clone()
        .oneshot(post_json("/api/addresses", &submission))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "All fields are required"})
    );
    assert!(store.is_empty());

    let response = app.oneshot(get("/api/addresses")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_create_empty_field_is_400() {
    let (app, store) = test_app_with_store();
    let mut submission = chennai_submission();
    submission["pinCode"] = json!("");

    let response = app
        .oneshot(post_json("/api/addresses", &submission))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "All fields are required");
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn test_create_numeric_pin_code_stored_as_text() {
    let mut submission = chennai_submission();
    submission["pinCode"] = json!(600001);
    let response = test_app()
        .oneshot(post_json("/api/addresses", &submission))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["pinCode"], "600001");
}

#[tokio::test]
async fn test_create_malformed_json_is_400() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/addresses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid request body");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_list_is_idempotent() {
    let app = test_app();
    app.clone()
        .oneshot(post_json("/api/addresses", &chennai_submission()))
        .await
        .unwrap();

    let first = body_json(app.clone().oneshot(get("/api/addresses")).await.unwrap()).await;
    let second = body_json(app.oneshot(get("/api/addresses")).await.unwrap()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_storage_fault_is_500() {
    let response = failing_store_app()
        .oneshot(get("/api/addresses"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch addresses");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn test_create_storage_fault_is_500() {
    let response = failing_store_app()
        .oneshot(post_json("/api/addresses", &chennai_submission()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to save address");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_validation_runs_before_store() {
    let response = failing_store_app()
        .oneshot(post_json("/api/addresses", &json!({"city": "Chennai"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// -- PIN Code -----------------------------------------------------------------

#[tokio::test]
async fn test_resolve_seeded_pin_codes() {
    let cases = [
        ("600001", "Chennai", "Tamil Nadu"),
        ("110001", "New Delhi", "Delhi"),
        ("400001", "Mumbai", "Maharashtra"),
    ];
    for (pin, city, state) in cases {
        let response = test_app()
            .oneshot(get(&format!("/api/pincode/{pin}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "pin {pin}");
        assert_eq!(
            body_json(response).await,
            json!({"city": city, "state": state})
        );
    }
}

#[tokio::test]
async fn test_unknown_pin_code_is_404() {
    let response = test_app()
        .oneshot(get("/api/pincode/000000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Invalid PIN Code"}));
}

#[tokio::test]
async fn test_non_six_digit_pin_code_is_404() {
    for pin in ["6000", "abcdef", "6000011"] {
        let response = test_app()
            .oneshot(get(&format!("/api/pincode/{pin}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "pin {pin}");
    }
}

#[tokio::test]
async fn test_directory_fault_is_500() {
    let state = AppState::new().with_directory(Arc::new(BrokenDirectory));
    let response = sab_api::app(state)
        .oneshot(get("/api/pincode/600001"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Error fetching PIN Code details");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("reference table unavailable"));
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

#[tokio::test]
async fn test_readiness_probe_reports_unreachable_store() {
    let response = failing_store_app()
        .oneshot(get("/health/readiness"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// -- Cross-cutting ------------------------------------------------------------

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/api/addresses")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_openapi_spec_served() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["openapi"].as_str().unwrap().starts_with("3."));
    assert!(spec["paths"]["/api/addresses"].is_object());
    assert!(spec["paths"]["/api/pincode/{pin}"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = test_app().oneshot(get("/api/nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
