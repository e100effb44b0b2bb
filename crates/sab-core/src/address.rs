//! # Address Records
//!
//! An [`Address`] is immutable once created: there is no update or delete
//! lifecycle. Submissions arrive as an [`AddressDraft`] and become a
//! [`NewAddress`] only after presence validation.
//!
//! ## Wire Format
//!
//! Field names are camelCase (`addressLine1`, `pinCode`). The identifier is
//! serialized as `_id`, the document-store convention browser clients key
//! their table rows on; `id` is accepted when decoding.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Country applied when a submission does not name one.
pub const DEFAULT_COUNTRY: &str = "India";

/// Unique identifier of a persisted address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(Uuid);

impl AddressId {
    /// Create a new random address identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an address identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AddressId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// System-generated identifier, assigned at creation.
    #[serde(rename = "_id", alias = "id")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Uuid))]
    pub id: AddressId,
    /// Street line (flat number, street name, ...).
    pub address_line1: String,
    /// City name.
    pub city: String,
    /// State or province name.
    pub state: String,
    /// Country name; never empty.
    pub country: String,
    /// Postal (PIN) code. Usually six ASCII digits, not enforced.
    pub pin_code: String,
}

/// An address submission as received, before validation.
///
/// Every field is optional so that a missing key and an empty string are
/// both reported through [`ValidationError::MissingFields`] rather than as
/// a deserialization failure. Numbers and booleans are accepted and kept
/// as their text (`600001` becomes `"600001"`); `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct AddressDraft {
    /// Street line.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_text")]
    pub address_line1: Option<String>,
    /// City name.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_text")]
    pub city: Option<String>,
    /// State name.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_text")]
    pub state: Option<String>,
    /// Country name; the default applies when absent or empty.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_text")]
    pub country: Option<String>,
    /// Postal (PIN) code.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_text")]
    pub pin_code: Option<String>,
}

/// Decode a JSON scalar as text. Objects and arrays are rejected.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct ScalarText;

    impl<'de> serde::de::Visitor<'de> for ScalarText {
        type Value = Option<String>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a string, number, boolean, or null")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: serde::Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(ScalarText)
}

fn present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.is_empty())
}

impl AddressDraft {
    /// Wire names of the required fields that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !present(&self.address_line1) {
            missing.push("addressLine1");
        }
        if !present(&self.city) {
            missing.push("city");
        }
        if !present(&self.state) {
            missing.push("state");
        }
        if !present(&self.pin_code) {
            missing.push("pinCode");
        }
        missing
    }

    /// Check that every required field is present and non-empty.
    ///
    /// Only presence is checked. Whitespace-only values and PIN codes that
    /// are not six digits pass.
    pub fn validate(self) -> Result<NewAddress, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields { fields: missing });
        }
        Ok(NewAddress {
            address_line1: self.address_line1.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            country: self.country.filter(|c| !c.is_empty()),
            pin_code: self.pin_code.unwrap_or_default(),
        })
    }
}

/// A validated address submission, ready to be persisted.
///
/// Only obtainable through [`AddressDraft::validate`], so the required
/// fields are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    address_line1: String,
    city: String,
    state: String,
    country: Option<String>,
    pin_code: String,
}

impl NewAddress {
    /// Street line.
    pub fn address_line1(&self) -> &str {
        &self.address_line1
    }

    /// City name.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// State name.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Country, if the submission named one.
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Postal (PIN) code.
    pub fn pin_code(&self) -> &str {
        &self.pin_code
    }

    /// Turn the submission into a stored record under `id`, filling in
    /// `default_country` when no country was given.
    pub fn into_address(self, id: AddressId, default_country: &str) -> Address {
        Address {
            id,
            address_line1: self.address_line1,
            city: self.city,
            state: self.state,
            country: self
                .country
                .unwrap_or_else(|| default_country.to_string()),
            pin_code: self.pin_code,
        }
    }
}
