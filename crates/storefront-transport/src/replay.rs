//! Replay transport for tests and local debugging.
//!
//! Serves recorded platform responses instead of talking to the network and
//! keeps every request it receives for later inspection.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// A recorded platform exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedExchange {
    /// HTTP method, e.g. `POST`.
    pub method: String,
    /// Path (and query) suffix the request URL must end with.
    pub path: String,
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// JSON response body; `null` replays an empty body.
    #[serde(default)]
    pub body: serde_json::Value,
}

impl RecordedExchange {
    fn to_response(&self) -> HttpResponse {
        let body = if self.body.is_null() {
            Vec::new()
        } else {
            self.body.to_string().into_bytes()
        };
        let mut headers = self.headers.clone();
        headers
            .entry("Content-Type".to_string())
            .or_insert_with(|| "application/json".to_string());
        HttpResponse::new(self.status, headers, body)
    }
}

#[derive(Debug, Clone)]
enum Outcome {
    Respond(HttpResponse),
    Fail(TransportError),
}

#[derive(Debug, Clone)]
struct Route {
    method: Method,
    path: String,
    outcome: Outcome,
}

impl Route {
    fn matches(&self, request: &HttpRequest) -> bool {
        if self.method != request.method {
            return false;
        }
        let target = request.path_and_query();
        if self.path.contains('?') {
            target.ends_with(&self.path)
        } else {
            target.split('?').next().unwrap_or(target).ends_with(&self.path)
        }
    }
}

/// A [`Transport`] that answers from recorded exchanges.
///
/// Routes are matched in registration order; the first route whose method
/// matches and whose path is a suffix of the request URL wins. A route path
/// without `?` ignores the query string. Unmatched requests fail with
/// [`TransportError::Connection`].
#[derive(Debug, Default)]
pub struct ReplayTransport {
    routes: Mutex<Vec<Route>>,
    received: Mutex<Vec<HttpRequest>>,
}

impl ReplayTransport {
    /// Create an empty replay transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load recorded exchanges from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, TransportError> {
        let exchanges: Vec<RecordedExchange> = serde_json::from_str(json)?;
        let transport = Self::new();
        for exchange in exchanges {
            let method: Method = exchange.method.parse()?;
            transport.push(method, &exchange.path, Outcome::Respond(exchange.to_response()));
        }
        Ok(transport)
    }

    /// Answer `method path` with a JSON body.
    pub fn respond(self, method: Method, path: &str, status: u16, body: serde_json::Value) -> Self {
        let exchange = RecordedExchange {
            method: method.as_str().to_string(),
            path: path.to_string(),
            status,
            headers: HashMap::new(),
            body,
        };
        self.push(method, path, Outcome::Respond(exchange.to_response()));
        self
    }

    /// Answer `method path` with a prepared response.
    pub fn respond_with(self, method: Method, path: &str, response: HttpResponse) -> Self {
        self.push(method, path, Outcome::Respond(response));
        self
    }

    /// Fail `method path` with a transport error.
    pub fn fail(self, method: Method, path: &str, error: TransportError) -> Self {
        self.push(method, path, Outcome::Fail(error));
        self
    }

    fn push(&self, method: Method, path: &str, outcome: Outcome) {
        self.routes.lock().push(Route {
            method,
            path: path.to_string(),
            outcome,
        });
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.received.lock().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.received.lock().last().cloned()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.received.lock().len()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for ReplayTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let outcome = self
            .routes
            .lock()
            .iter()
            .find(|route| route.matches(&request))
            .map(|route| route.outcome.clone());
        let description = format!("{} {}", request.method, request.path_and_query());
        self.received.lock().push(request);

        match outcome {
            Some(Outcome::Respond(response)) => Ok(response),
            Some(Outcome::Fail(error)) => Err(error),
            None => Err(TransportError::Connection(format!(
                "no recorded response for {}",
                description
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_replays_matching_route() {
        let transport =
            ReplayTransport::new().respond(Method::Get, "/context", 200, json!({ "token": "t" }));

        let resp = transport
            .send(HttpRequest::new(Method::Get, "https://shop.test/store-api/context"))
            .await
            .unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.json::<serde_json::Value>().unwrap(), json!({ "token": "t" }));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_method_must_match() {
        let transport = ReplayTransport::new().respond(Method::Post, "/context", 200, json!({}));
        let err = transport
            .send(HttpRequest::new(Method::Get, "https://shop.test/store-api/context"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connection(_)));
        // Unmatched requests are still recorded.
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_recorded_failure() {
        let transport =
            ReplayTransport::new().fail(Method::Post, "/product", TransportError::Cancelled);
        let err = transport
            .send(HttpRequest::new(Method::Post, "https://shop.test/store-api/product"))
            .await
            .unwrap_err();
        assert_eq!(err, TransportError::Cancelled);
    }

    #[tokio::test]
    async fn test_from_json_recording() {
        let recording = r#"[
            { "method": "POST", "path": "/seo-url", "status": 200, "body": { "total": 0, "elements": [] } },
            { "method": "GET", "path": "/checkout/cart", "status": 204 }
        ]"#;
        let transport = ReplayTransport::from_json(recording).unwrap();

        let seo = transport
            .send(HttpRequest::new(Method::Post, "https://shop.test/store-api/seo-url"))
            .await
            .unwrap();
        assert_eq!(seo.status, 200);

        let cart = transport
            .send(HttpRequest::new(Method::Get, "https://shop.test/store-api/checkout/cart"))
            .await
            .unwrap();
        assert_eq!(cart.status, 204);
        assert!(cart.is_empty());
        assert_eq!(
            transport.last_request().map(|r| r.url),
            Some("https://shop.test/store-api/checkout/cart".to_string())
        );
    }
}
