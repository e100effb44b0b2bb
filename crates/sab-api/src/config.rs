//! # Server Configuration
//!
//! Every setting has a default matching the reference deployment, so the
//! server starts with no environment at all (in-memory store on port 5000).
//!
//! | Variable                  | Default   |
//! |---------------------------|-----------|
//! | `PORT`                    | `5000`    |
//! | `BIND_ADDR`               | `0.0.0.0` |
//! | `DATABASE_URL`            | unset     |
//! | `DB_CONNECT_TIMEOUT_SECS` | `30`      |
//! | `DB_MAX_CONNECTIONS`      | `10`      |
//! | `DEFAULT_COUNTRY`         | `India`   |
//! | `LOG_FORMAT`              | `text`    |

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use sab_core::DEFAULT_COUNTRY;
use thiserror::Error;

/// Log line format for the server binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Application configuration.
///
/// Custom `Debug` redacts `database_url`, which usually embeds a password.
#[derive(Clone)]
pub struct AppConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: IpAddr,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Postgres connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// How long to wait for a pooled connection before giving up.
    pub db_connect_timeout: Duration,
    /// Upper bound on pooled Postgres connections.
    pub db_max_connections: u32,
    /// Country stored when a submission omits one.
    pub default_country: String,
    /// Log line format.
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("db_connect_timeout", &self.db_connect_timeout)
            .field("db_max_connections", &self.db_max_connections)
            .field("default_country", &self.default_country)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            database_url: None,
            db_connect_timeout: Duration::from_secs(30),
            db_max_connections: 10,
            default_country: DEFAULT_COUNTRY.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

/// Configuration errors. Any of these aborts startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// The offending value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => parse("BIND_ADDR", &raw)?,
            None => defaults.bind_addr,
        };
        let port = match get("PORT") {
            Some(raw) => parse("PORT", &raw)?,
            None => defaults.port,
        };
        let db_connect_timeout = match get("DB_CONNECT_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse("DB_CONNECT_TIMEOUT_SECS", &raw)?),
            None => defaults.db_connect_timeout,
        };
        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => {
                let n: u32 = parse("DB_MAX_CONNECTIONS", &raw)?;
                if n == 0 {
                    return Err(ConfigError::Invalid {
                        var: "DB_MAX_CONNECTIONS",
                        value: raw,
                        reason: "must be at least 1".into(),
                    });
                }
                n
            }
            None => defaults.db_max_connections,
        };
        let log_format = match get("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase) {
            None => LogFormat::Text,
            Some(v) if v == "text" => LogFormat::Text,
            Some(v) if v == "json" => LogFormat::Json,
            Some(v) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: v,
                    reason: "expected \"text\" or \"json\"".into(),
                })
            }
        };

        Ok(Self {
            bind_addr,
            port,
            database_url: get("DATABASE_URL"),
            db_connect_timeout,
            db_max_connections,
            default_country: get("DEFAULT_COUNTRY").unwrap_or(defaults.default_country),
            log_format,
        })
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
