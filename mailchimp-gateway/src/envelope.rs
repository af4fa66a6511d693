//! Response envelopes for callers exposing gateway results over HTTP.
//!
//! Successful payloads are wrapped as `{"data": ..., "status": "success"}`
//! and failures as `{"error": "...", "status": false}`.

use crate::error::{ErrorKind, GatewayError};
use reqwest::StatusCode;
use serde::Serialize;

/// Successful response wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    /// Wrapped payload
    pub data: T,
    /// Always `"success"`
    pub status: &'static str,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap a successful payload.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            data,
            status: "success",
        }
    }
}

/// Failure response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Error message
    pub error: String,
    /// Always `false`
    pub status: bool,
    #[serde(skip)]
    code: StatusCode,
}

impl ErrorBody {
    /// HTTP status to respond with.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        self.code
    }
}

impl From<&GatewayError> for ErrorBody {
    fn from(err: &GatewayError) -> Self {
        let code = match err.kind() {
            ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Gateway => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        };

        Self {
            error: err.message().to_string(),
            status: false,
            code,
        }
    }
}

impl From<GatewayError> for ErrorBody {
    fn from(err: GatewayError) -> Self {
        Self::from(&err)
    }
}
