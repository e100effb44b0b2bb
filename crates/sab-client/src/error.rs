//! Client error types.

/// Errors from address book API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error (connection refused, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// Method and path of the call.
        endpoint: String,
        /// Underlying reqwest failure.
        source: reqwest::Error,
    },
    /// The API answered with a non-2xx status.
    #[error("API {endpoint} returned {status}: {body}")]
    ApiError {
        /// Method and path of the call.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// Method and path of the call.
        endpoint: String,
        /// Underlying decode failure.
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl ClientError {
    /// HTTP status of an API error response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `error` field of an API error body, when the body is the
    /// server's JSON error shape.
    pub fn api_message(&self) -> Option<String> {
        let Self::ApiError { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value.get("error")?.as_str().map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, body: &str) -> ClientError {
        ClientError::ApiError {
            endpoint: "POST /api/addresses".into(),
            status,
            body: body.into(),
        }
    }

    #[test]
    fn api_message_reads_error_field() {
        let err = api_error(400, r#"{"error":"All fields are required"}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.api_message().as_deref(), Some("All fields are required"));
    }

    #[test]
    fn api_message_absent_for_plain_body() {
        let err = api_error(502, "Bad Gateway");
        assert_eq!(err.api_message(), None);
        assert!(err.to_string().contains("502"));
    }
}
