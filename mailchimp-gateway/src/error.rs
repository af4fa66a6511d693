//! Gateway error types using thiserror 2.0.
//!
//! Every failure the client can produce is normalized here into a
//! [`GatewayError`]: either a configuration problem detected at construction,
//! or an upstream failure carrying the best-known HTTP status code.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Status code reported when no HTTP response was received
/// (connection refused, timeout, undecodable body).
pub const TRANSPORT_STATUS: u16 = 0;

/// Longest body excerpt kept in an error message.
const BODY_PREVIEW_CHARS: usize = 256;

/// Coarse classification of a [`GatewayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The client could not be configured.
    Configuration,
    /// Talking to the upstream API failed.
    Gateway,
}

/// Gateway errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Missing or malformed configuration; the client cannot be built
    #[error("Configuration error: {message}")]
    Configuration {
        /// What was wrong with the configuration
        message: String,
    },

    /// Upstream request failed
    #[error("{message}")]
    Upstream {
        /// Human-readable failure description
        message: String,
        /// Upstream HTTP status, or [`TRANSPORT_STATUS`]
        status_code: u16,
    },
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Problem document returned by MailChimp on errors.
#[derive(Debug, Deserialize)]
struct ProblemDocument {
    title: Option<String>,
    detail: Option<String>,
}

impl GatewayError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    /// Create an upstream error with an explicit status code.
    #[must_use]
    pub fn upstream(status_code: u16, msg: impl Into<String>) -> Self {
        Self::Upstream {
            message: msg.into(),
            status_code,
        }
    }

    /// Create an upstream error for a failure with no HTTP status.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::upstream(TRANSPORT_STATUS, msg)
    }

    /// Create a 400 error for a request rejected before reaching upstream.
    #[must_use]
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::upstream(StatusCode::BAD_REQUEST.as_u16(), msg)
    }

    /// Translate a non-2xx upstream response, keeping its status verbatim.
    ///
    /// MailChimp problem documents become `"{title}: {detail}"`; any other
    /// body is quoted as a short preview.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ProblemDocument>(body) {
            Ok(ProblemDocument {
                title: Some(title),
                detail: Some(detail),
            }) if !detail.is_empty() => format!("{title}: {detail}"),
            Ok(ProblemDocument {
                title: Some(title), ..
            }) => title,
            _ if body.trim().is_empty() => format!("HTTP {status}"),
            _ => {
                let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
                format!("HTTP {status}: {preview}")
            }
        };

        Self::upstream(status.as_u16(), message)
    }

    /// Error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Upstream { .. } => ErrorKind::Gateway,
        }
    }

    /// Upstream status code; [`TRANSPORT_STATUS`] when none applies.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Configuration { .. } => TRANSPORT_STATUS,
            Self::Upstream { status_code, .. } => *status_code,
        }
    }

    /// Error message without the variant prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Configuration { message } | Self::Upstream { message, .. } => message,
        }
    }

    /// Whether no HTTP response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Upstream { status_code: TRANSPORT_STATUS, .. })
    }

    /// Check if a caller could reasonably retry.
    ///
    /// The client never retries on its own.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Configuration { .. } => false,
            Self::Upstream { status_code, .. } => {
                *status_code == TRANSPORT_STATUS || *status_code == 429 || *status_code >= 500
            }
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::upstream(status.as_u16(), err.to_string());
        }

        let message = if err.is_timeout() {
            format!("Request timed out: {err}")
        } else if err.is_connect() {
            format!("Connection failed: {err}")
        } else if err.is_decode() {
            format!("Invalid response body: {err}")
        } else {
            format!("Transport error: {err}")
        };

        Self::transport(message)
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::transport(format!("Invalid JSON in response: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::configuration("API key is required");
        assert_eq!(err.to_string(), "Configuration error: API key is required");

        let err = GatewayError::upstream(404, "Resource Not Found");
        assert_eq!(err.to_string(), "Resource Not Found");
    }

    #[test]
    fn test_kind_and_status() {
        let err = GatewayError::configuration("bad");
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.status_code(), TRANSPORT_STATUS);

        let err = GatewayError::upstream(404, "missing");
        assert_eq!(err.kind(), ErrorKind::Gateway);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "missing");
    }

    #[test]
    fn test_from_status_problem_document() {
        let body = r#"{
            "type": "https://mailchimp.com/developer/marketing/docs/errors/",
            "title": "Resource Not Found",
            "status": 404,
            "detail": "The requested resource could not be found.",
            "instance": "995c5cb0-3280-4a6e-808b-3b096d0bb219"
        }"#;

        let err = GatewayError::from_status(StatusCode::NOT_FOUND, body);
        assert_eq!(err.status_code(), 404);
        assert_eq!(
            err.message(),
            "Resource Not Found: The requested resource could not be found."
        );
    }

    #[test]
    fn test_from_status_title_only() {
        let body = r#"{"title": "API Key Invalid", "detail": ""}"#;
        let err = GatewayError::from_status(StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.message(), "API Key Invalid");
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_from_status_plain_body() {
        let err = GatewayError::from_status(StatusCode::BAD_GATEWAY, "upstream exploded");
        assert_eq!(err.message(), "HTTP 502 Bad Gateway: upstream exploded");

        let err = GatewayError::from_status(StatusCode::NOT_FOUND, "");
        assert_eq!(err.message(), "HTTP 404 Not Found");
    }

    #[test]
    fn test_from_status_truncates_long_body() {
        let body = "x".repeat(1000);
        let err = GatewayError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        assert!(err.message().len() < 300);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(GatewayError::transport("connection refused").is_retryable());
        assert!(GatewayError::upstream(429, "slow down").is_retryable());
        assert!(GatewayError::upstream(503, "down").is_retryable());
        assert!(!GatewayError::upstream(404, "missing").is_retryable());
        assert!(!GatewayError::bad_request("bad id").is_retryable());
        assert!(!GatewayError::configuration("bad key").is_retryable());
    }

    #[test]
    fn test_json_error_is_transport() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json")
            .expect_err("should fail to parse");
        let err: GatewayError = json_err.into();
        assert!(err.is_transport());
        assert!(err.message().starts_with("Invalid JSON in response"));
    }
}
