//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every fault raised inside a handler ends up here and leaves as a JSON
//! body of the form `{"error": "...", "details": "..."}`; nothing escapes a
//! handler unconverted.
//!
//! | Variant           | Status | `error`                          | `details` |
//! |-------------------|--------|----------------------------------|-----------|
//! | `Validation`      | 400    | `All fields are required`        | none      |
//! | `BadRequest`      | 400    | `Invalid request body`           | rejection |
//! | `PinCodeNotFound` | 404    | `Invalid PIN Code`               | none      |
//! | `FetchAddresses`  | 500    | `Failed to fetch addresses`      | backend   |
//! | `SaveAddress`     | 500    | `Failed to save address`         | backend   |
//! | `PinCodeLookup`   | 500    | `Error fetching PIN Code details`| provider  |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sab_core::{DirectoryError, StorageError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable summary.
    pub error: String,
    /// Underlying cause, present for server-side faults and body rejections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field was absent or empty (400).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body was not a JSON object of the expected shape (400).
    #[error("invalid request body: {0}")]
    BadRequest(String),

    /// The postal code is not in the directory (404).
    #[error("no directory entry for PIN code {0:?}")]
    PinCodeNotFound(String),

    /// Listing addresses failed in the store (500).
    #[error("failed to fetch addresses: {0}")]
    FetchAddresses(#[source] StorageError),

    /// Persisting an address failed in the store (500).
    #[error("failed to save address: {0}")]
    SaveAddress(#[source] StorageError),

    /// The postal-code directory itself failed (500).
    #[error("postal code lookup failed: {0}")]
    PinCodeLookup(#[source] DirectoryError),
}

impl AppError {
    /// HTTP status code and the client-facing `error` message.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "Invalid request body".into()),
            Self::PinCodeNotFound(_) => (StatusCode::NOT_FOUND, "Invalid PIN Code".into()),
            Self::FetchAddresses(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch addresses".into(),
            ),
            Self::SaveAddress(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save address".into(),
            ),
            Self::PinCodeLookup(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error fetching PIN Code details".into(),
            ),
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Self::Validation(_) | Self::PinCodeNotFound(_) => None,
            Self::BadRequest(text) => Some(text.clone()),
            Self::FetchAddresses(err) | Self::SaveAddress(err) => Some(err.to_string()),
            Self::PinCodeLookup(err) => Some(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = ErrorBody {
            error: message,
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}
