//! Error taxonomy surfaced to callers of the session and record access layers

use roster_core::CoreError;
use roster_http::ClientError;
use thiserror::Error;

use crate::storage::StorageError;

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// No token is stored; no request was made
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Login was rejected or could not be completed
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Input was refused, locally or by the server
    #[error("{message}")]
    Validation { message: String },

    /// Any other failed request
    #[error("{message}")]
    Server {
        /// `None` when the server was never reached
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ConsoleError {
    /// Map a failed read. Every error status is a server error.
    pub fn from_read(error: ClientError, fallback: &str) -> Self {
        Self::from_client(error, fallback, false)
    }

    /// Map a failed write. A refused submission (400, 409, 422) is a
    /// validation error carrying the server's message.
    pub fn from_write(error: ClientError, fallback: &str) -> Self {
        Self::from_client(error, fallback, true)
    }

    /// Map a transport error, using `fallback` when the server gave no message
    fn from_client(error: ClientError, fallback: &str, rejection_is_validation: bool) -> Self {
        if error.is_malformed() {
            return Self::MalformedResponse {
                message: error.to_string(),
            };
        }

        let rejected = rejection_is_validation && error.is_rejection();
        match error {
            ClientError::Status { status, message } => {
                let message = message.unwrap_or_else(|| fallback.to_string());
                if rejected {
                    Self::Validation { message }
                } else {
                    Self::Server {
                        status: Some(status),
                        message,
                    }
                }
            }
            ClientError::Configuration(message) => Self::Configuration(message),
            other => Self::Server {
                status: None,
                message: format!("{fallback}: {other}"),
            },
        }
    }

    /// Map a login failure; every failed response is an authentication error
    pub fn from_login(error: ClientError, fallback: &str) -> Self {
        if error.is_malformed() {
            return Self::MalformedResponse {
                message: error.to_string(),
            };
        }

        match error {
            ClientError::Status { message, .. } => Self::Auth {
                message: message.unwrap_or_else(|| fallback.to_string()),
            },
            ClientError::Configuration(message) => Self::Configuration(message),
            other => Self::Auth {
                message: format!("{fallback}: {other}"),
            },
        }
    }

    /// HTTP status of the failed request, when there was one
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<CoreError> for ConsoleError {
    fn from(error: CoreError) -> Self {
        Self::Validation {
            message: error.to_string(),
        }
    }
}
