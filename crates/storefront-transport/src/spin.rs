//! Spin outbound HTTP transport (wasm32 only).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Sends requests through Spin's outbound HTTP host interface.
///
/// Connection management, TLS and the allowed-hosts policy belong to the
/// Spin runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinTransport;

impl SpinTransport {
    /// Create a new Spin transport.
    pub fn new() -> Self {
        Self
    }
}

fn spin_method(method: Method) -> spin_sdk::http::Method {
    use spin_sdk::http::Method as SpinMethod;

    match method {
        Method::Get => SpinMethod::Get,
        Method::Post => SpinMethod::Post,
        Method::Put => SpinMethod::Put,
        Method::Patch => SpinMethod::Patch,
        Method::Delete => SpinMethod::Delete,
        Method::Head => SpinMethod::Head,
        Method::Options => SpinMethod::Options,
    }
}

#[async_trait(?Send)]
impl Transport for SpinTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = spin_sdk::http::Request::builder();
        builder.method(spin_method(request.method));
        builder.uri(request.url.as_str());

        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder.body(body);
        }

        let response: spin_sdk::http::Response = spin_sdk::http::send(builder.build())
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = *response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or("").to_string()))
            .collect();
        let body = response.into_body();

        Ok(HttpResponse::new(status, headers, body))
    }
}
