//! # Addresses API
//!
//! ## Endpoints
//!
//! - `GET /api/addresses`: list every stored address
//! - `POST /api/addresses`: validate and store a new address
//!
//! There is no update, delete, or single-record fetch: addresses are
//! immutable once created.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use sab_core::{Address, AddressDraft};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Build the addresses router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/addresses", get(list_addresses).post(create_address))
}

/// GET /api/addresses: List all addresses.
#[utoipa::path(
    get,
    path = "/api/addresses",
    responses(
        (status = 200, description = "All stored addresses", body = Vec<Address>),
        (status = 500, description = "Storage fault", body = crate::error::ErrorBody),
    ),
    tag = "addresses"
)]
pub async fn list_addresses(State(state): State<AppState>) -> Result<Json<Vec<Address>>, AppError> {
    let addresses = state.store.list().await.map_err(AppError::FetchAddresses)?;
    Ok(Json(addresses))
}

/// POST /api/addresses: Create an address.
///
/// Rejected with 400 before touching the store when any of `addressLine1`,
/// `city`, `state`, `pinCode` is absent or empty.
#[utoipa::path(
    post,
    path = "/api/addresses",
    request_body = AddressDraft,
    responses(
        (status = 200, description = "Address created", body = Address),
        (status = 400, description = "Missing field or malformed body", body = crate::error::ErrorBody),
        (status = 500, description = "Storage fault", body = crate::error::ErrorBody),
    ),
    tag = "addresses"
)]
pub async fn create_address(
    State(state): State<AppState>,
    body: Result<Json<AddressDraft>, JsonRejection>,
) -> Result<Json<Address>, AppError> {
    let draft = extract_json(body)?;
    tracing::debug!(?draft, "received address submission");

    let new = draft.validate()?;
    let address = state
        .store
        .create(new)
        .await
        .map_err(AppError::SaveAddress)?;

    tracing::info!(id = %address.id, pin_code = %address.pin_code, "address created");
    Ok(Json(address))
}
