//! Client configuration.
//!
//! Points the client at one Smart Address Book API deployment. Defaults
//! target a server on the local machine.

use url::Url;

/// Base URL used when `SAB_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Request timeout used when `SAB_TIMEOUT_SECS` is unset or unparsable.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for connecting to the address book API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API server. Paths are resolved relative to it.
    pub base_url: Url,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Build a configuration for an explicit base URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SAB_API_URL` (default: `http://localhost:5000`)
    /// - `SAB_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("SAB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Ok(Self {
            base_url: parse_base_url("SAB_API_URL", &raw)?,
            timeout_secs: std::env::var("SAB_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Override the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Parse a base URL, normalising it to end in `/` so that relative joins
/// keep any path prefix.
fn parse_base_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            var.to_string(),
            "not a base URL".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A base URL could not be parsed.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
