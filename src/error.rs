//! Error types for the ph8-link client library.

use thiserror::Error;

/// Result type for ph8-link operations
pub type Result<T> = std::result::Result<T, Ph8LinkError>;

/// Errors that can occur when talking to the ph8 backend
#[derive(Debug, Error)]
pub enum Ph8LinkError {
    /// A single request was rejected for credential reasons: bad login,
    /// expired or invalid access token, invalid refresh token.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// The refresh token was missing or rejected. Terminal: both tokens
    /// have been cleared and the user must log in again.
    #[error("Session expired, please login again")]
    SessionExpired,

    /// Any other non-2xx response from the server.
    #[error("Server error ({status_code}): {message}")]
    ServerError { status_code: u16, message: String },

    /// Invalid client configuration (missing base URL, bad timeout, ...)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Token store read/write failure
    #[error("Token storage error: {0}")]
    StorageError(String),

    /// Transport-level failure from reqwest
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Failed to serialize or deserialize a payload
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Ph8LinkError {
    /// True for errors that force the caller back to the login form
    pub fn requires_reauth(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}
