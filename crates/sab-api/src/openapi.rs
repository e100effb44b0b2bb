//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Smart Address Book API",
        version = "0.1.0",
        description = "Address records and postal-code autofill.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::addresses::list_addresses,
        crate::routes::addresses::create_address,
        crate::routes::pincode::resolve_pin_code,
    ),
    components(schemas(
        sab_core::Address,
        sab_core::AddressDraft,
        sab_core::PinCodeDetails,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "addresses", description = "Address records"),
        (name = "pincode", description = "Postal-code lookup"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
