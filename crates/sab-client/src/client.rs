//! Typed client for the address book HTTP API.
//!
//! One method per endpoint:
//!
//! | Method                  | Endpoint                 |
//! |-------------------------|--------------------------|
//! | `list_addresses`        | `GET /api/addresses`     |
//! | `create_address`        | `POST /api/addresses`    |
//! | `resolve_pin_code`      | `GET /api/pincode/{pin}` |
//!
//! Requests are never retried.

use std::time::Duration;

use reqwest::StatusCode;
use sab_core::{Address, AddressDraft, PinCodeDetails};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::error::ClientError;

/// Result of a PIN code lookup that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinCodeLookup {
    /// The server resolved the code to a city and state.
    Found(PinCodeDetails),
    /// The server answered 200 but city or state was absent or empty.
    Incomplete,
    /// The server does not know the code (404).
    NotFound,
}

/// 200 body of the PIN code endpoint, read leniently.
#[derive(Debug, Deserialize)]
struct PinCodeReply {
    city: Option<String>,
    state: Option<String>,
}

impl From<PinCodeReply> for PinCodeLookup {
    fn from(reply: PinCodeReply) -> Self {
        match (reply.city, reply.state) {
            (Some(city), Some(state)) if !city.is_empty() && !state.is_empty() => {
                Self::Found(PinCodeDetails { city, state })
            }
            _ => Self::Incomplete,
        }
    }
}

/// Client for the Smart Address Book API.
#[derive(Debug, Clone)]
pub struct AddressBookClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AddressBookClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List every stored address.
    ///
    /// Calls `GET {base_url}api/addresses`.
    pub async fn list_addresses(&self) -> Result<Vec<Address>, ClientError> {
        let endpoint = "GET /api/addresses";
        let url = self.join("api/addresses")?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| http_error(endpoint, e))?;
        read_json(endpoint, resp).await
    }

    /// Submit an address. The server validates presence of the required
    /// fields and applies the default country.
    ///
    /// Calls `POST {base_url}api/addresses`.
    pub async fn create_address(&self, draft: &AddressDraft) -> Result<Address, ClientError> {
        let endpoint = "POST /api/addresses";
        let url = self.join("api/addresses")?;

        let resp = self
            .http
            .post(url)
            .json(draft)
            .send()
            .await
            .map_err(|e| http_error(endpoint, e))?;
        read_json(endpoint, resp).await
    }

    /// Resolve a PIN code to city and state.
    ///
    /// Calls `GET {base_url}api/pincode/{pin}`. A 404 is
    /// [`PinCodeLookup::NotFound`], not an error.
    pub async fn resolve_pin_code(&self, pin: &str) -> Result<PinCodeLookup, ClientError> {
        let endpoint = "GET /api/pincode/{pin}";
        let mut url = self.join("api/pincode/")?;
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::Config(ConfigError::InvalidUrl(
                    self.base_url.to_string(),
                    "not a base URL".into(),
                ))
            })?
            .pop_if_empty()
            .push(pin);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| http_error(endpoint, e))?;

        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!(pin, "PIN code not found");
            return Ok(PinCodeLookup::NotFound);
        }
        let reply: PinCodeReply = read_json(endpoint, resp).await?;
        Ok(reply.into())
    }

    fn join(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Config(ConfigError::InvalidUrl(path.into(), e.to_string())))
    }
}

fn http_error(endpoint: &str, source: reqwest::Error) -> ClientError {
    ClientError::Http {
        endpoint: endpoint.into(),
        source,
    }
}

/// Fail on non-2xx, then decode the JSON body.
async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(endpoint, status, "API call failed");
        return Err(ClientError::ApiError {
            endpoint: endpoint.into(),
            status,
            body,
        });
    }

    resp.json().await.map_err(|e| ClientError::Deserialization {
        endpoint: endpoint.into(),
        source: e,
    })
}
