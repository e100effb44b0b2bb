//! # sab-api: Axum API Service for the Smart Address Book
//!
//! Exposes address records and postal-code autofill over JSON/HTTP.
//!
//! ## API Surface
//!
//! | Route                    | Module                  | Operation          |
//! |--------------------------|-------------------------|--------------------|
//! | `GET /api/addresses`     | [`routes::addresses`]   | ListAddresses      |
//! | `POST /api/addresses`    | [`routes::addresses`]   | CreateAddress      |
//! | `GET /api/pincode/:pin`  | [`routes::pincode`]     | ResolvePostalCode  |
//! | `GET /health/liveness`   | here                    | liveness probe     |
//! | `GET /health/readiness`  | here                    | readiness probe    |
//! | `GET /openapi.json`      | [`openapi`]             | OpenAPI document   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → DefaultBodyLimit → Handler
//! ```
//!
//! ## Crate Policy
//!
//! - Handlers validate, delegate to the store or directory, and convert
//!   every failure to [`AppError`]. No business rules live in handlers
//!   beyond presence validation, which itself lives in `sab-core`.
//! - The service holds no state of its own; see [`state::AppState`].

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod store;

pub use error::AppError;
pub use state::AppState;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::addresses::router())
        .merge(routes::pincode::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(middleware::BODY_LIMIT_BYTES));

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new()
        .merge(health)
        .merge(api)
        .with_state(state)
        .layer(middleware::trace_layer())
        .layer(middleware::cors_layer())
}

/// Liveness probe. Always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 when the store answers a ping, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ready").into_response(),
        Err(e) => {
            tracing::warn!(backend = state.store.backend(), "store health check failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "store unreachable").into_response()
        }
    }
}
