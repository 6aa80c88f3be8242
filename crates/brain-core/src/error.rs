//! Error types for completion backends.

use thiserror::Error;

/// Errors that can occur while requesting a completion.
///
/// Variants are split into transient causes, which a caller may retry, and
/// permanent causes, which will fail the same way on every attempt. See
/// [`BrainError::is_transient`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BrainError {
    /// The backend is misconfigured (missing credential, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never reached the service or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the transport timeout.
    #[error("request timed out")]
    Timeout,

    /// The service rejected the request because of rate limiting.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The service failed with a 5xx status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The credential was rejected.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The service rejected the request as invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response could not be understood.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl BrainError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout | Self::RateLimited(_) | Self::Server { .. }
        )
    }

    /// Classify a non-success HTTP status into an error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Authentication(message),
            408 => Self::Timeout,
            429 => Self::RateLimited(message),
            500..=599 => Self::Server { status, message },
            _ => Self::InvalidRequest(format!("status {}: {}", status, message)),
        }
    }
}
