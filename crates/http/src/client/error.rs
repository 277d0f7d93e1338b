//! Client error types

use thiserror::Error;

use crate::convert::NormalizeError;
use crate::types::ErrorBody;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        status: u16,
        /// The `error` field of the response body, when there was one
        message: Option<String>,
    },

    /// Success body was not the expected JSON
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Success body parsed but a record did not fit the schema
    #[error("Malformed record: {0}")]
    Normalize(#[from] NormalizeError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from an HTTP status code and the raw response body
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error)
            .filter(|message| !message.trim().is_empty());

        Self::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// HTTP status, if the server answered at all
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the server attached to a failure
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// The server refused the submitted data
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Status { status: 400 | 409 | 422, .. })
    }

    /// The response arrived but did not fit the schema
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Normalize(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_message_taken_from_error_field() {
        let err = ClientError::from_status(
            StatusCode::CONFLICT,
            r#"{"error":"El email ya está registrado"}"#,
        );
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.server_message(), Some("El email ya está registrado"));
        assert!(err.is_rejection());
    }

    #[test]
    fn test_non_json_body_has_no_message() {
        let err = ClientError::from_status(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "Server error 502: no details");
    }

    #[test]
    fn test_json_without_error_field_has_no_message() {
        let err = ClientError::from_status(StatusCode::NOT_FOUND, r#"{"mensaje":"nope"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.server_message(), None);
    }
}
