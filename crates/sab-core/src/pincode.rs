//! # Postal-Code Directory
//!
//! Maps a PIN code to the city and state it belongs to. Lookups are exact
//! string matches: a key of any length or format is accepted, and anything
//! not in the table resolves to `None`.
//!
//! The [`PostalCodeDirectory`] trait is the seam the HTTP layer depends on.
//! [`StaticPostalCodeDirectory`] is the default provider, seeded with three
//! entries at construction and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DirectoryError;

/// City and state resolved from a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PinCodeDetails {
    /// City name.
    pub city: String,
    /// State name.
    pub state: String,
}

impl PinCodeDetails {
    /// Build a details value from borrowed parts.
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }
}

/// Source of postal-code reference data.
///
/// Implementations must be `Send + Sync` so one instance can be shared by
/// every request handler behind an `Arc`. The trait is object-safe so the
/// provider can be chosen at runtime (seeded table vs. test fixture).
pub trait PostalCodeDirectory: Send + Sync + std::fmt::Debug {
    /// Look up `code`.
    ///
    /// Returns `Ok(None)` for an unknown code. `Err` is reserved for faults
    /// inside the provider itself.
    fn resolve(&self, code: &str) -> Result<Option<PinCodeDetails>, DirectoryError>;
}

/// In-memory directory backed by a fixed table.
#[derive(Debug, Clone)]
pub struct StaticPostalCodeDirectory {
    entries: BTreeMap<String, PinCodeDetails>,
}

impl StaticPostalCodeDirectory {
    /// The seeded reference table.
    pub fn seeded() -> Self {
        Self::from_entries([
            ("600001", PinCodeDetails::new("Chennai", "Tamil Nadu")),
            ("110001", PinCodeDetails::new("New Delhi", "Delhi")),
            ("400001", PinCodeDetails::new("Mumbai", "Maharashtra")),
        ])
    }

    /// Build a directory from arbitrary entries (fixtures, alternate
    /// regions). Later duplicates replace earlier ones.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PinCodeDetails)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(code, details)| (code.into(), details))
                .collect(),
        }
    }

    /// Number of codes in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the known codes in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for StaticPostalCodeDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

impl PostalCodeDirectory for StaticPostalCodeDirectory {
    fn resolve(&self, code: &str) -> Result<Option<PinCodeDetails>, DirectoryError> {
        Ok(self.entries.get(code).cloned())
    }
}
