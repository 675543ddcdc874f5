//! Timeout decorator for native transports.

use std::time::Duration;

use async_trait::async_trait;

use crate::{HttpRequest, HttpResponse, Transport, TransportError};

/// Default total timeout for a single platform call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Wraps another transport and aborts calls that exceed `total`.
///
/// An aborted call surfaces as [`TransportError::Timeout`].
#[derive(Debug, Clone)]
pub struct TimeoutTransport<T> {
    inner: T,
    total: Duration,
}

impl<T> TimeoutTransport<T> {
    /// Create a new timeout wrapper.
    pub fn new(inner: T, total: Duration) -> Self {
        Self { inner, total }
    }

    /// The configured total timeout.
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Unwrap the inner transport.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for TimeoutTransport<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        match tokio::time::timeout(self.total, self.inner.send(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_ms = self.total.as_millis() as u64, "platform call timed out");
                Err(TransportError::Timeout(self.total))
            }
        }
    }
}
