//! # PIN Code API
//!
//! - `GET /api/pincode/:pin`: resolve a postal code to city and state
//!
//! The code is passed to the directory verbatim. No length or digit check
//! happens here; anything the directory does not know is a 404.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use sab_core::PinCodeDetails;

use crate::error::AppError;
use crate::state::AppState;

/// Build the PIN code router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/pincode/:pin", get(resolve_pin_code))
}

/// GET /api/pincode/:pin: Resolve a PIN code.
#[utoipa::path(
    get,
    path = "/api/pincode/{pin}",
    params(("pin" = String, Path, description = "Postal (PIN) code, matched exactly")),
    responses(
        (status = 200, description = "City and state for the code", body = PinCodeDetails),
        (status = 404, description = "Code not in the directory", body = crate::error::ErrorBody),
        (status = 500, description = "Directory fault", body = crate::error::ErrorBody),
    ),
    tag = "pincode"
)]
pub async fn resolve_pin_code(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<PinCodeDetails>, AppError> {
    match state.directory.resolve(&pin).map_err(AppError::PinCodeLookup)? {
        Some(details) => Ok(Json(details)),
        None => Err(AppError::PinCodeNotFound(pin)),
    }
}
