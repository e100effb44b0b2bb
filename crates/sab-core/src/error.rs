//! # Error Hierarchy
//!
//! Structured error types for the address book, built with `thiserror`.
//! Each error carries enough context for an operator to diagnose the
//! failure without reproducing it.

use thiserror::Error;

/// Rejection of an address submission before it reaches any store.
///
/// Validation is presence-only: a field is missing when it is absent or an
/// empty string. Content is never inspected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more of `addressLine1`, `city`, `state`, `pinCode` was absent
    /// or empty.
    #[error("All fields are required")]
    MissingFields {
        /// Wire names of the missing fields, in declaration order.
        fields: Vec<&'static str>,
    },
}

/// Failure of the persistence layer.
///
/// Every variant carries the backend's own message so it can be surfaced
/// as the `details` of a 500 response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend could not be reached (connection refused, pool timeout,
    /// network loss).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend was reachable but refused the operation.
    #[error("storage rejected the operation: {0}")]
    Rejected(String),
}

/// Unexpected failure inside a postal-code directory.
///
/// An unknown code is not an error; directories report it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("postal code directory failure: {0}")]
pub struct DirectoryError(pub String);
