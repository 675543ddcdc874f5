//! Transport error types.

use std::time::Duration;

use thiserror::Error;

/// Failures that happen before a response from the remote service is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be delivered (DNS, TLS, refused connection, ...).
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The request did not complete in time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The caller aborted the request.
    #[error("Request cancelled")]
    Cancelled,

    /// The request could not be built from the supplied parts.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The response arrived but its body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl TransportError {
    /// Whether the failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout(_))
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::InvalidRequest(e.to_string())
    }
}
