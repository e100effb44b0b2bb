//! Persistence tests for the PostgreSQL address store.
//!
//! These need a live database and only run when `DATABASE_URL` is set:
//!
//! ```text
//! DATABASE_URL=postgres://... cargo test -p sab-api --test postgres_store_test
//! ```
//!
//! Without it every test returns early. Tests share the database, so each
//! tags its rows with a fresh UUID and only looks at its own rows.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use sab_api::config::AppConfig;
use sab_api::store::{init_pool, AddressStore, PgAddressStore};
use sab_api::AppState;
use sab_core::{Address, AddressDraft, NewAddress, StorageError};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Connect and migrate, or `None` when no database is configured.
async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("DATABASE_URL not set; skipping Postgres store test");
            return None;
        }
    };
    let config = AppConfig {
        database_url: Some(url),
        ..AppConfig::default()
    };
    init_pool(&config).await.expect("database reachable and migrated")
}

fn new_address(line1: &str, country: Option<&str>) -> NewAddress {
    AddressDraft {
        address_line1: Some(line1.into()),
        city: Some("Mumbai".into()),
        state: Some("Maharashtra".into()),
        country: country.map(String::from),
        pin_code: Some("400001".into()),
    }
    .validate()
    .expect("valid draft")
}

fn tagged<'a>(addresses: &'a [Address], tag: &str) -> Vec<&'a Address> {
    addresses
        .iter()
        .filter(|a| a.address_line1.starts_with(tag))
        .collect()
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgAddressStore::new(pool.clone(), "India");
    let tag = Uuid::new_v4().to_string();

    let created = store
        .create(new_address(&format!("{tag} 1 Marine Dr"), None))
        .await
        .unwrap();
    assert_eq!(created.country, "India");

    let listed = store.list().await.unwrap();
    let mine = tagged(&listed, &tag);
    assert_eq!(mine, vec![&created]);

    pool.close().await;
}

#[tokio::test]
async fn explicit_and_default_country_persist() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgAddressStore::new(pool.clone(), "Bhutan");
    let tag = Uuid::new_v4().to_string();

    store
        .create(new_address(&format!("{tag} a"), None))
        .await
        .unwrap();
    store
        .create(new_address(&format!("{tag} b"), Some("Nepal")))
        .await
        .unwrap();

    let listed = store.list().await.unwrap();
    let countries: Vec<&str> = tagged(&listed, &tag)
        .iter()
        .map(|a| a.country.as_str())
        .collect();
    assert_eq!(countries, vec!["Bhutan", "Nepal"]);

    pool.close().await;
}

#[tokio::test]
async fn list_returns_insertion_order() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgAddressStore::new(pool.clone(), "India");
    let tag = Uuid::new_v4().to_string();

    for n in ["first", "second", "third"] {
        store
            .create(new_address(&format!("{tag} {n}"), None))
            .await
            .unwrap();
    }

    let listed = store.list().await.unwrap();
    let lines: Vec<String> = tagged(&listed, &tag)
        .iter()
        .map(|a| a.address_line1.trim_start_matches(tag.as_str()).trim().to_string())
        .collect();
    assert_eq!(lines, vec!["first", "second", "third"]);

    pool.close().await;
}

#[tokio::test]
async fn empty_required_field_rejected_by_schema() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let result = sqlx::query(
        "INSERT INTO addresses (id, address_line1, city, state, country, pin_code)
         VALUES ($1, $2, '', 'Delhi', 'India', '110001')",
    )
    .bind(Uuid::new_v4())
    .bind(format!("{} 1 Janpath", Uuid::new_v4()))
    .execute(&pool)
    .await;
    assert!(result.is_err(), "empty city must violate the CHECK constraint");

    pool.close().await;
}

#[tokio::test]
async fn ping_succeeds_then_fails_after_close() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = PgAddressStore::new(pool.clone(), "India");
    assert!(store.ping().await.is_ok());

    pool.close().await;
    assert!(matches!(
        store.ping().await,
        Err(StorageError::Unavailable(_))
    ));
}

#[tokio::test]
async fn http_create_is_visible_to_list() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let store = Arc::new(PgAddressStore::new(pool.clone(), "India"));
    let app = sab_api::app(AppState::with_store(AppConfig::default(), store));
    let tag = Uuid::new_v4().to_string();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/addresses")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "addressLine1": format!("{tag} 12 Main St"),
                "city": "Chennai",
                "state": "Tamil Nadu",
                "pinCode": "600001"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["country"], "India");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/addresses")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let listed: Vec<Value> = serde_json::from_slice(&bytes).unwrap();
    assert!(listed.iter().any(|a| a == &created));

    pool.close().await;
}
