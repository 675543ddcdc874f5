//! Transport boundary for the storefront API contract layer.
//!
//! The contract layer encodes a complete [`HttpRequest`] and hands it to a
//! [`Transport`]; the transport owns connections, TLS and timeouts and returns
//! the raw [`HttpResponse`] or a [`TransportError`].
//!
//! Implementations:
//! - `SpinTransport` - Spin outbound HTTP (wasm32)
//! - `TimeoutTransport` - aborts slow calls (native)
//! - [`ReplayTransport`] - answers from recorded exchanges
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_transport::{HttpRequest, Method, Transport};
//!
//! let request = HttpRequest::new(Method::Get, "https://shop.example/store-api/context")
//!     .header("sw-access-key", access_key)
//!     .header("Accept", "application/json");
//! let response = transport.send(request).await?;
//! ```

mod error;
mod replay;
mod request;
mod response;
#[cfg(target_arch = "wasm32")]
mod spin;
#[cfg(not(target_arch = "wasm32"))]
mod timeout;

use std::sync::Arc;

use async_trait::async_trait;

pub use error::TransportError;
pub use replay::{RecordedExchange, ReplayTransport};
pub use request::{HttpRequest, Method};
pub use response::HttpResponse;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinTransport;
#[cfg(not(target_arch = "wasm32"))]
pub use timeout::{TimeoutTransport, DEFAULT_TIMEOUT};

/// Performs a single HTTP exchange.
///
/// A call either yields the platform's response, whatever its status, or a
/// [`TransportError`] when no response was received.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    /// Send the request and wait for the response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{HttpRequest, HttpResponse, Method, Transport, TransportError};
}
