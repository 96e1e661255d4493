//! Error types for calls to the scanning service.

use assetscan_auth::AuthError;
use thiserror::Error;

/// Errors that can occur while talking to the scanning service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request rejected locally before any network call
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The service reported the session missing or expired (HTTP 401)
    #[error("authentication required: session is missing or expired")]
    Unauthorized,

    /// Sign-in rejected by the service
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Any other non-success status
    #[error("API error: status {status}, {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the response body, or the raw body
        message: String,
    },

    /// Network error (unreachable service, timeout, TLS)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("failed to parse response from {path}: {message}")]
    Parse {
        /// Endpoint path
        path: String,
        /// Parser message
        message: String,
    },

    /// Request body could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session store failure
    #[error("session error: {0}")]
    Session(#[from] AuthError),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// True for the HTTP 401 case.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
