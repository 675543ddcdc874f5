//! Fault taxonomy and the response normalizer.
//!
//! Every failed call ends in exactly one [`Fault`] variant. Faults raised
//! after the request left the process are transport, structured API or
//! protocol faults; nothing is retried and nothing is downgraded.

use std::fmt;

use serde::{Deserialize, Serialize};
use storefront_schema::MessageKey;
use storefront_transport::{HttpResponse, TransportError};
use thiserror::Error;

use crate::contract::{OperationContract, ResponseSchema};

/// A classified failure of an operation call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Fault {
    /// The key names no catalog entry.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The parameters do not fit the contract; nothing was sent.
    #[error("Malformed request for {operation}: {reason}")]
    MalformedRequest { operation: String, reason: String },

    /// No response was received.
    #[error("Transport fault: {0}")]
    Transport(#[from] TransportError),

    /// The platform answered with its error payload.
    #[error("API fault (HTTP {status}): {payload}")]
    StructuredApi { status: u16, payload: ApiErrorPayload },

    /// The response does not fit the contract.
    #[error(transparent)]
    Protocol(#[from] ProtocolFault),
}

/// A response that does not fit the registered contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolFault {
    /// The status code has no registered response schema.
    #[error("Unexpected status {status}")]
    UnexpectedStatus { status: u16, body: String },

    /// The body could not be decoded as the registered schema.
    #[error("Failed to decode {schema} from status {status}: {message}")]
    Decode {
        status: u16,
        schema: String,
        message: String,
    },
}

/// Fault classes, for logging and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    UnknownOperation,
    MalformedRequest,
    Transport,
    StructuredApi,
    Protocol,
}

impl FaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::UnknownOperation => "unknown_operation",
            FaultKind::MalformedRequest => "malformed_request",
            FaultKind::Transport => "transport",
            FaultKind::StructuredApi => "structured_api",
            FaultKind::Protocol => "protocol",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Fault {
    pub(crate) fn malformed(operation: &str, reason: impl Into<String>) -> Self {
        Fault::MalformedRequest {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::UnknownOperation(_) => FaultKind::UnknownOperation,
            Fault::MalformedRequest { .. } => FaultKind::MalformedRequest,
            Fault::Transport(_) => FaultKind::Transport,
            Fault::StructuredApi { .. } => FaultKind::StructuredApi,
            Fault::Protocol(_) => FaultKind::Protocol,
        }
    }

    /// HTTP status of the response that caused the fault, if one arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Fault::StructuredApi { status, .. } => Some(*status),
            Fault::Protocol(ProtocolFault::UnexpectedStatus { status, .. }) => Some(*status),
            Fault::Protocol(ProtocolFault::Decode { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// The platform's error payload, for structured API faults.
    pub fn payload(&self) -> Option<&ApiErrorPayload> {
        match self {
            Fault::StructuredApi { payload, .. } => Some(payload),
            _ => None,
        }
    }

    /// Message keys of a structured API fault, in payload order.
    pub fn message_keys(&self) -> Vec<MessageKey> {
        self.payload()
            .map(ApiErrorPayload::message_keys)
            .unwrap_or_default()
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Fault::Transport(_))
    }
}

/// The platform's error body: `{"errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorPayload {
    pub errors: Vec<ApiErrorDetail>,
}

/// One entry of the platform's error body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl ApiErrorDetail {
    pub fn message_key(&self) -> Option<MessageKey> {
        self.message_key.as_deref().map(MessageKey::from)
    }
}

impl ApiErrorPayload {
    /// Parse a response body as the platform's error payload.
    ///
    /// Only a JSON object with a non-empty `errors` array of objects
    /// qualifies.
    pub fn detect(body: &[u8]) -> Option<Self> {
        let payload: ApiErrorPayload = serde_json::from_slice(body).ok()?;
        if payload.errors.is_empty() {
            return None;
        }
        Some(payload)
    }

    pub fn message_keys(&self) -> Vec<MessageKey> {
        self.errors
            .iter()
            .filter_map(ApiErrorDetail::message_key)
            .collect()
    }
}

impl fmt::Display for ApiErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            let text = error
                .detail
                .as_deref()
                .or(error.title.as_deref())
                .unwrap_or("unknown error");
            match &error.code {
                Some(code) => write!(f, "[{}] {}", code, text)?,
                None => f.write_str(text)?,
            }
        }
        Ok(())
    }
}

/// Decide what a response means for `contract`.
///
/// Returns the success schema for a registered 2xx status. Any other
/// response becomes a fault: a platform error payload yields
/// [`Fault::StructuredApi`] whether or not its status is registered; an
/// unregistered status without one yields
/// [`ProtocolFault::UnexpectedStatus`] carrying the raw body.
pub fn normalize<'c>(
    contract: &'c OperationContract,
    response: &HttpResponse,
) -> Result<&'c ResponseSchema, Fault> {
    if let Some(schema) = contract.response_for(response.status) {
        if response.is_success() && !matches!(schema, ResponseSchema::ApiError) {
            return Ok(schema);
        }
    }

    if let Some(payload) = ApiErrorPayload::detect(response.bytes()) {
        return Err(Fault::StructuredApi {
            status: response.status,
            payload,
        });
    }

    Err(ProtocolFault::UnexpectedStatus {
        status: response.status,
        body: response.text_lossy(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::SchemaRef;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use storefront_transport::Method;

    fn contract() -> OperationContract {
        OperationContract::new("readSeoUrl", Method::Post, "/seo-url")
            .ok(SchemaRef::search_result("SeoUrl"))
            .response(404, ResponseSchema::ApiError)
    }

    fn response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse::json_body(status, body.to_string())
    }

    #[test]
    fn test_registered_success() {
        let contract = contract();
        let schema = normalize(&contract, &response(200, json!({ "elements": [] }))).unwrap();
        assert_eq!(schema, &ResponseSchema::Json(SchemaRef::search_result("SeoUrl")));
    }

    #[test]
    fn test_error_payload_keeps_message_key() {
        let body = json!({ "errors": [{
            "status": "400",
            "code": "CHECKOUT__CART_LINE_ITEM_NOT_STACKABLE",
            "title": "Bad Request",
            "detail": "Out of stock",
            "messageKey": "product-out-of-stock",
            "meta": { "parameters": { "id": "p1" } }
        }]});
        let fault = normalize(&contract(), &response(400, body)).unwrap_err();

        assert_eq!(fault.kind(), FaultKind::StructuredApi);
        assert_eq!(fault.status(), Some(400));
        assert_eq!(fault.message_keys(), vec![MessageKey::ProductOutOfStock]);
        let payload = fault.payload().unwrap();
        assert_eq!(payload.errors[0].meta, Some(json!({ "parameters": { "id": "p1" } })));
        assert_eq!(
            fault.to_string(),
            "API fault (HTTP 400): [CHECKOUT__CART_LINE_ITEM_NOT_STACKABLE] Out of stock"
        );
    }

    #[test]
    fn test_registered_error_status_is_structured() {
        let body = json!({ "errors": [{ "status": "404", "code": "FRAMEWORK__NOT_FOUND" }] });
        let fault = normalize(&contract(), &response(404, body)).unwrap_err();
        assert_eq!(fault.kind(), FaultKind::StructuredApi);
    }

    #[test]
    fn test_unregistered_status_is_protocol_fault() {
        let fault = normalize(&contract(), &response(502, json!({ "message": "bad gateway" }))).unwrap_err();
        match fault {
            Fault::Protocol(ProtocolFault::UnexpectedStatus { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, r#"{"message":"bad gateway"}"#);
            }
            other => panic!("expected protocol fault, got {:?}", other),
        }
    }

    #[test]
    fn test_unregistered_success_status_is_protocol_fault() {
        let fault = normalize(&contract(), &response(201, json!({}))).unwrap_err();
        assert_eq!(fault.kind(), FaultKind::Protocol);
        assert_eq!(fault.status(), Some(201));
    }

    #[test]
    fn test_empty_errors_array_is_not_a_payload() {
        assert!(ApiErrorPayload::detect(br#"{"errors": []}"#).is_none());
        assert!(ApiErrorPayload::detect(b"<html>").is_none());
    }
}
