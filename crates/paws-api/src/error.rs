//! API client error types.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use paws_commerce::GatewayError;

/// Error type for backend requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The backend rejected the auth token.
    #[error("Session expired. Please login again.")]
    Unauthorized,

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded its total timeout.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// The response body could not be parsed.
    #[error("invalid response body: {0}")]
    Deserialization(String),

    /// The request could not be built or serialized.
    #[error("invalid request: {0}")]
    Request(String),
}

impl ApiError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::Timeout(_) => true,
            ApiError::Status { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}

impl From<ApiError> for GatewayError {
    fn from(error: ApiError) -> Self {
        if error.is_transient() {
            return GatewayError::transient(error.to_string());
        }
        match error {
            ApiError::Status { status, message } => GatewayError::rejected(Some(status), message),
            ApiError::Unauthorized => {
                GatewayError::rejected(Some(401), "Session expired. Please login again.")
            }
            other => GatewayError::rejected(None, other.to_string()),
        }
    }
}

/// Pull a meaningful message out of a backend error envelope.
///
/// The backend wraps failures in several shapes (`message`, `errors[]`,
/// `error`, `detail`); fall back to `default` when none match.
pub fn extract_error_message(body: &Value, default: &str) -> String {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return message.to_string();
    }

    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        let messages: Vec<String> = errors
            .iter()
            .filter_map(|e| {
                e.get("message")
                    .or_else(|| e.get("msg"))
                    .and_then(Value::as_str)
                    .map(|message| {
                        match e
                            .get("field")
                            .or_else(|| e.get("param"))
                            .and_then(Value::as_str)
                        {
                            Some(field) => format!("{field}: {message}"),
                            None => message.to_string(),
                        }
                    })
            })
            .collect();
        if !messages.is_empty() {
            return messages.join(", ");
        }
    }

    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return error.to_string();
    }
    if let Some(detail) = body.get("detail").and_then(Value::as_str) {
        return detail.to_string();
    }

    default.to_string()
}
