//! The dispatcher: one generic routine for every catalog operation.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use storefront_transport::{HttpRequest, HttpResponse, Transport};
#[cfg(not(target_arch = "wasm32"))]
use storefront_transport::{TimeoutTransport, DEFAULT_TIMEOUT};
use tracing::{debug, warn};

use crate::catalog::{storefront_catalog, Catalog};
use crate::config::ApiConfig;
use crate::contract::{OperationContract, ResponseSchema, SchemaRef};
use crate::encode::encode;
use crate::fault::{normalize, Fault, ProtocolFault};
use crate::operation::Operation;

/// Calls catalog operations over a transport.
///
/// The dispatcher holds no per-call state; concurrent calls share it freely.
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    catalog: Arc<Catalog>,
    config: ApiConfig,
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    /// Dispatcher over the storefront catalog.
    pub fn new(config: ApiConfig, transport: T) -> Self {
        Self::with_catalog(storefront_catalog(), config, transport)
    }

    /// Dispatcher over a custom catalog.
    pub fn with_catalog(catalog: Arc<Catalog>, config: ApiConfig, transport: T) -> Self {
        Self {
            catalog,
            config,
            transport,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A dispatcher for another session / cart token, sharing catalog and
    /// transport.
    pub fn with_context_token(&self, token: impl Into<String>) -> Self
    where
        T: Clone,
    {
        Self {
            catalog: Arc::clone(&self.catalog),
            config: self.config.clone().with_context_token(token),
            transport: self.transport.clone(),
        }
    }

    /// Encode a call without sending it.
    pub fn encode(&self, key: &str, params: &Value) -> Result<HttpRequest, Fault> {
        let contract = self.catalog.contract(key)?;
        encode(contract, &self.config, params)
    }

    /// Call a typed operation.
    pub async fn invoke<O: Operation>(&self, params: &O::Params) -> Result<O::Response, Fault> {
        let result = self.call::<O::Response, O::Params>(O::KEY, params).await;
        self.trace_fault(O::KEY, result)
    }

    /// Call any catalog operation with an untyped parameter object.
    ///
    /// The body is parsed as JSON and checked against the outer shape of the
    /// registered schema; an empty or no-content response yields `null`.
    pub async fn invoke_raw(&self, key: &str, params: Value) -> Result<Value, Fault> {
        let result = self.call_raw(key, params).await;
        self.trace_fault(key, result)
    }

    async fn call<R, P>(&self, key: &str, params: &P) -> Result<R, Fault>
    where
        R: DeserializeOwned,
        P: Serialize + Sync + ?Sized,
    {
        let contract = self.catalog.contract(key)?;
        let params = serde_json::to_value(params).map_err(|e| {
            Fault::malformed(contract.name(), format!("parameters are not serializable: {}", e))
        })?;
        let response = self.exchange(contract, &params).await?;
        let schema = normalize(contract, &response)?;
        decode(schema, &response)
    }

    async fn call_raw(&self, key: &str, params: Value) -> Result<Value, Fault> {
        let contract = self.catalog.contract(key)?;
        let response = self.exchange(contract, &params).await?;
        let schema = normalize(contract, &response)?;
        let value: Value = decode(schema, &response)?;
        if let ResponseSchema::Json(schema_ref) = schema {
            if !value.is_null() && !schema_ref.accepts(&value) {
                return Err(decode_fault(response.status, schema_ref, "unexpected outer shape"));
            }
        }
        Ok(value)
    }

    async fn exchange(
        &self,
        contract: &OperationContract,
        params: &Value,
    ) -> Result<HttpResponse, Fault> {
        let request = encode(contract, &self.config, params)?;
        debug!(
            operation = contract.name(),
            method = %request.method,
            url = %request.url,
            "Dispatching request"
        );
        let response = self.transport.send(request).await?;
        debug!(
            operation = contract.name(),
            status = response.status,
            bytes = response.body.len(),
            "Received response"
        );
        Ok(response)
    }

    fn trace_fault<R>(&self, key: &str, result: Result<R, Fault>) -> Result<R, Fault> {
        if let Err(fault) = &result {
            warn!(
                operation = key,
                kind = %fault.kind(),
                status = fault.status(),
                error = %fault,
                "Operation failed"
            );
        }
        result
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Transport> Dispatcher<TimeoutTransport<T>> {
    /// Dispatcher whose calls are bounded by the configured timeout, or
    /// [`DEFAULT_TIMEOUT`] when none is set.
    pub fn timed(config: ApiConfig, transport: T) -> Self {
        let total = config.timeout().unwrap_or(DEFAULT_TIMEOUT);
        Self::new(config, TimeoutTransport::new(transport, total))
    }
}

fn decode<R: DeserializeOwned>(schema: &ResponseSchema, response: &HttpResponse) -> Result<R, Fault> {
    let schema_name = match schema {
        ResponseSchema::Json(schema_ref) => schema_ref.to_string(),
        ResponseSchema::NoContent => "no content".to_string(),
        ResponseSchema::ApiError => "error payload".to_string(),
    };
    let result = if response.is_empty() || matches!(schema, ResponseSchema::NoContent) {
        serde_json::from_value(Value::Null)
    } else {
        response.json()
    };
    result.map_err(|e| {
        ProtocolFault::Decode {
            status: response.status,
            schema: schema_name,
            message: e.to_string(),
        }
        .into()
    })
}

fn decode_fault(status: u16, schema: &SchemaRef, message: &str) -> Fault {
    ProtocolFault::Decode {
        status,
        schema: schema.to_string(),
        message: message.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::ReadContext;
    use crate::operation::NoParams;
    use serde_json::json;
    use storefront_transport::{Method, ReplayTransport, TransportError};

    fn dispatcher(transport: ReplayTransport) -> Dispatcher<Arc<ReplayTransport>> {
        Dispatcher::new(ApiConfig::new("https://shop.test", "SWSC123"), Arc::new(transport))
    }

    #[tokio::test]
    async fn test_typed_invoke_decodes_response() {
        let api = dispatcher(ReplayTransport::new().respond(
            Method::Get,
            "/context",
            200,
            json!({ "token": "ctx-1", "currency": { "isoCode": "EUR" } }),
        ));
        let context = api.invoke::<ReadContext>(&NoParams {}).await.unwrap();
        assert_eq!(context.token.as_deref(), Some("ctx-1"));
        assert_eq!(context.currency_iso_code(), Some("EUR"));
    }

    #[tokio::test]
    async fn test_unknown_operation() {
        let api = dispatcher(ReplayTransport::new());
        let err = api.invoke_raw("readWishlist", json!({})).await.unwrap_err();
        assert_eq!(err, Fault::UnknownOperation("readWishlist".to_string()));
        assert_eq!(api.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_request_is_not_sent() {
        let api = dispatcher(ReplayTransport::new());
        let err = api
            .invoke_raw("readProductListing", json!({ "limit": 1 }))
            .await
            .unwrap_err();
        assert!(matches!(err, Fault::MalformedRequest { .. }));
        assert_eq!(api.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_fault() {
        let api = dispatcher(ReplayTransport::new().fail(
            Method::Get,
            "/context",
            TransportError::Timeout(std::time::Duration::from_secs(5)),
        ));
        let err = api.invoke::<ReadContext>(&NoParams {}).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_raw_invoke_checks_outer_shape() {
        let api = dispatcher(ReplayTransport::new().respond(
            Method::Post,
            "/navigation/main-navigation/main-navigation",
            200,
            json!({ "not": "an array" }),
        ));
        let err = api
            .invoke_raw(
                "readNavigation",
                json!({ "activeId": "main-navigation", "rootId": "main-navigation" }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Fault::Protocol(ProtocolFault::Decode { .. })));
    }

    #[tokio::test]
    async fn test_no_content_decodes_as_null() {
        let api = dispatcher(ReplayTransport::new().respond(
            Method::Delete,
            "/checkout/cart",
            204,
            serde_json::Value::Null,
        ));
        let value = api.invoke_raw("deleteCart", json!({})).await.unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_context_token_is_scoped() {
        let api = dispatcher(ReplayTransport::new().respond(Method::Get, "/context", 200, json!({})));
        let cart_api = api.with_context_token("cart-7");

        cart_api.invoke::<ReadContext>(&NoParams {}).await.unwrap();
        let request = cart_api.transport().last_request().unwrap();
        assert_eq!(request.header_value("sw-context-token"), Some("cart-7"));
        assert_eq!(api.config().context_token, None);
    }

    struct Stalled(std::time::Duration);

    #[async_trait::async_trait]
    impl Transport for Stalled {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            tokio::time::sleep(self.0).await;
            Ok(HttpResponse::json_body(200, "{}"))
        }
    }

    #[tokio::test]
    async fn test_timed_dispatcher_applies_configured_timeout() {
        let config = ApiConfig::new("https://shop.test", "SWSC123")
            .with_timeout(std::time::Duration::from_millis(20));
        let api = Dispatcher::timed(config, Stalled(std::time::Duration::from_secs(5)));
        assert_eq!(api.transport().total(), std::time::Duration::from_millis(20));

        let err = api.invoke::<ReadContext>(&NoParams {}).await.unwrap_err();
        assert_eq!(
            err,
            Fault::Transport(TransportError::Timeout(std::time::Duration::from_millis(20)))
        );
    }

    #[test]
    fn test_timed_dispatcher_falls_back_to_default() {
        let api = Dispatcher::timed(
            ApiConfig::new("https://shop.test", "SWSC123"),
            ReplayTransport::new(),
        );
        assert_eq!(api.transport().total(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_encode_without_sending() {
        let api = dispatcher(ReplayTransport::new());
        let request = api
            .encode(
                "deleteLineItem delete /checkout/cart/line-item?id[]={ids}",
                &json!({ "ids": ["a", "b"] }),
            )
            .unwrap();
        assert_eq!(
            request.url,
            "https://shop.test/store-api/checkout/cart/line-item?id[]=a&id[]=b"
        );
    }
}
