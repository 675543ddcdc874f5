//! Request encoding.
//!
//! Turns a contract and a flat parameter object into an [`HttpRequest`]:
//! path placeholders are substituted, query and header parameters are
//! serialized, and whatever is left becomes the JSON body. Encoding is pure;
//! nothing here touches the network.

use serde_json::{Map, Value};
use storefront_transport::HttpRequest;

use crate::config::ApiConfig;
use crate::contract::{ListStyle, OperationContract, ParamSpec, ParamType};
use crate::fault::Fault;
use crate::key::{PathSegment, QueryItem};

/// Encode a call of `contract` with `params`.
///
/// `params` must be a JSON object (or `null` for none); `null` members count
/// as absent.
pub fn encode(
    contract: &OperationContract,
    config: &ApiConfig,
    params: &Value,
) -> Result<HttpRequest, Fault> {
    let mut encoder = Encoder::new(contract, params)?;

    let path = encoder.path()?;
    let query = encoder.query()?;
    let mut headers = config.auth_headers();
    headers.extend(encoder.headers()?);

    let mut url = format!("{}{}", config.base_url(), path);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }

    let mut request = HttpRequest::new(contract.method(), url).headers(headers);
    match &contract.request_body {
        Some(body) => {
            let bytes = serde_json::to_vec(&Value::Object(encoder.remaining)).map_err(|e| {
                Fault::malformed(contract.name(), format!("body is not serializable: {}", e))
            })?;
            request = request.header("Content-Type", body.content_type.clone()).body(bytes);
        }
        None if !encoder.remaining.is_empty() => {
            let names: Vec<&str> = encoder.remaining.keys().map(String::as_str).collect();
            return Err(encoder.malformed(format!(
                "unknown parameter(s) `{}` for an operation without a request body",
                names.join("`, `")
            )));
        }
        None => {}
    }
    Ok(request)
}

struct Encoder<'c> {
    contract: &'c OperationContract,
    remaining: Map<String, Value>,
}

impl<'c> Encoder<'c> {
    fn new(contract: &'c OperationContract, params: &Value) -> Result<Self, Fault> {
        let remaining = match params {
            Value::Object(map) => map
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            Value::Null => Map::new(),
            other => {
                return Err(Fault::malformed(
                    contract.name(),
                    format!("parameters must be a JSON object, got {}", json_type(other)),
                ))
            }
        };
        Ok(Self {
            contract,
            remaining,
        })
    }

    fn malformed(&self, reason: impl Into<String>) -> Fault {
        Fault::malformed(self.contract.name(), reason)
    }

    /// Remove a parameter, checking it against its declared type.
    fn take(&mut self, name: &str, spec: Option<&ParamSpec>) -> Result<Option<Value>, Fault> {
        let Some(value) = self.remaining.remove(name) else {
            return match spec {
                Some(spec) if spec.required => {
                    Err(self.malformed(format!("missing required parameter `{}`", name)))
                }
                _ => Ok(None),
            };
        };
        if let Some(spec) = spec {
            if !spec.ty.accepts(&value) {
                return Err(self.malformed(format!(
                    "parameter `{}` expects {:?}, got {}",
                    name,
                    spec.ty,
                    json_type(&value)
                )));
            }
        }
        Ok(Some(value))
    }

    fn path(&mut self) -> Result<String, Fault> {
        let contract = self.contract;
        let mut path = String::new();
        for segment in contract.key.path().segments() {
            match segment {
                PathSegment::Literal(text) => path.push_str(text),
                PathSegment::Placeholder(name) => {
                    let spec = contract.parameters.path.iter().find(|s| &s.name == name);
                    let value = self.take(name, spec)?.ok_or_else(|| {
                        self.malformed(format!("missing path parameter `{}`", name))
                    })?;
                    let text = self.scalar(name, &value)?;
                    if text.is_empty() {
                        return Err(self.malformed(format!("empty path parameter `{}`", name)));
                    }
                    path.push_str(&percent_encode(&text));
                }
            }
        }
        Ok(path)
    }

    fn query(&mut self) -> Result<Vec<String>, Fault> {
        let contract = self.contract;
        let template = contract.key.path();
        let declared = |name: &str| contract.parameters.query.iter().find(|s| s.name == name);
        let mut pairs = Vec::new();

        for item in template.query() {
            match item {
                QueryItem::Name(name) => match self.take(name, declared(name))? {
                    Some(value) => {
                        let style = list_style(declared(name), ListStyle::Pipe);
                        let key = match style {
                            ListStyle::Bracket => format!("{}[]", name),
                            ListStyle::Pipe => name.clone(),
                        };
                        self.push_pairs(&mut pairs, name, &key, style, &value)?;
                    }
                    // An unset bare name stays in the URL as written.
                    None => pairs.push(name.clone()),
                },
                QueryItem::Placeholder { key, param } => {
                    if let Some(value) = self.take(param, declared(param))? {
                        let style = list_style(declared(param), ListStyle::Bracket);
                        self.push_pairs(&mut pairs, param, key, style, &value)?;
                    }
                }
                QueryItem::Fixed { key, value } => pairs.push(format!("{}={}", key, value)),
            }
        }

        for spec in &contract.parameters.query {
            if template.mentions(&spec.name) {
                continue;
            }
            if let Some(value) = self.take(&spec.name, Some(spec))? {
                let style = list_style(Some(spec), ListStyle::Bracket);
                let key = match (&spec.ty, style) {
                    (ParamType::List(_), ListStyle::Bracket) => format!("{}[]", spec.name),
                    _ => spec.name.clone(),
                };
                self.push_pairs(&mut pairs, &spec.name, &key, style, &value)?;
            }
        }
        Ok(pairs)
    }

    fn push_pairs(
        &self,
        pairs: &mut Vec<String>,
        name: &str,
        key: &str,
        style: ListStyle,
        value: &Value,
    ) -> Result<(), Fault> {
        let items = match value {
            Value::Array(items) => items
                .iter()
                .map(|item| self.scalar(name, item))
                .collect::<Result<Vec<_>, _>>()?,
            scalar => vec![self.scalar(name, scalar)?],
        };
        if items.is_empty() {
            return Err(self.malformed(format!("parameter `{}` has no values", name)));
        }
        match style {
            ListStyle::Pipe => {
                pairs.push(format!("{}={}", key, percent_encode(&items.join("|"))));
            }
            ListStyle::Bracket => {
                pairs.extend(
                    items
                        .iter()
                        .map(|item| format!("{}={}", key, percent_encode(item))),
                );
            }
        }
        Ok(())
    }

    fn headers(&mut self) -> Result<Vec<(String, String)>, Fault> {
        let contract = self.contract;
        let mut headers = Vec::new();
        for spec in &contract.parameters.header {
            if let Some(value) = self.take(&spec.name, Some(spec))? {
                let text = match &value {
                    Value::Array(items) => items
                        .iter()
                        .map(|item| self.scalar(&spec.name, item))
                        .collect::<Result<Vec<_>, _>>()?
                        .join(","),
                    scalar => self.scalar(&spec.name, scalar)?,
                };
                headers.push((spec.name.clone(), text));
            }
        }
        Ok(headers)
    }

    fn scalar(&self, name: &str, value: &Value) -> Result<String, Fault> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(self.malformed(format!(
                "parameter `{}` must be a scalar, got {}",
                name,
                json_type(other)
            ))),
        }
    }
}

fn list_style(spec: Option<&ParamSpec>, default: ListStyle) -> ListStyle {
    match spec.map(|s| &s.ty) {
        Some(ParamType::List(style)) => *style,
        _ => default,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Percent-encode everything except RFC 3986 unreserved characters.
pub fn percent_encode(input: &str) -> String {
    escape(input, |_| false)
}

/// URI component encoding: like [`percent_encode`], but `!*'()` stay as is.
pub fn encode_component(input: &str) -> String {
    escape(input, |byte| matches!(byte, b'!' | b'*' | b'\'' | b'(' | b')'))
}

fn escape(input: &str, keep: impl Fn(u8) -> bool) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ if keep(byte) => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::SchemaRef;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use storefront_transport::Method;

    fn config() -> ApiConfig {
        ApiConfig::new("https://shop.test", "SWSC123")
    }

    fn read_category() -> OperationContract {
        OperationContract::new("readCategory", Method::Post, "/category/{navigationId}?slots")
            .path_param("navigationId")
            .query_param(ParamSpec::optional("slots", ParamType::List(ListStyle::Pipe)))
            .body(SchemaRef::object("ExtendedProductListingCriteria"))
            .ok(SchemaRef::object("ExtendedCategory"))
    }

    fn delete_line_item() -> OperationContract {
        OperationContract::new(
            "deleteLineItem",
            Method::Delete,
            "/checkout/cart/line-item?id[]={ids}",
        )
        .query_param(ParamSpec::required("ids", ParamType::List(ListStyle::Bracket)))
        .ok(SchemaRef::object("ExtendedCart"))
    }

    fn body_json(request: &HttpRequest) -> Value {
        serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn test_path_substitution_keeps_bare_query_name() {
        let request = encode(&read_category(), &config(), &json!({ "navigationId": "abc" })).unwrap();
        assert_eq!(request.url, "https://shop.test/store-api/category/abc?slots");
        assert_eq!(request.method, Method::Post);
        assert_eq!(body_json(&request), json!({}));
    }

    #[test]
    fn test_missing_path_parameter_is_malformed() {
        let err = encode(&read_category(), &config(), &json!({ "limit": 1 })).unwrap_err();
        match err {
            Fault::MalformedRequest { operation, reason } => {
                assert_eq!(operation, "readCategory");
                assert!(reason.contains("navigationId"));
            }
            other => panic!("expected malformed request, got {:?}", other),
        }
    }

    #[test]
    fn test_null_path_parameter_counts_as_missing() {
        let err = encode(&read_category(), &config(), &json!({ "navigationId": null })).unwrap_err();
        assert!(matches!(err, Fault::MalformedRequest { .. }));
    }

    #[test]
    fn test_pipe_list_and_body_split() {
        let request = encode(
            &read_category(),
            &config(),
            &json!({ "navigationId": "abc", "slots": ["s1", "s2"], "limit": 10, "p": 2 }),
        )
        .unwrap();
        assert_eq!(request.url, "https://shop.test/store-api/category/abc?slots=s1%7Cs2");
        assert_eq!(body_json(&request), json!({ "limit": 10, "p": 2 }));
        assert_eq!(request.header_value("content-type"), Some("application/json"));
    }

    #[test]
    fn test_bracket_list() {
        let request = encode(&delete_line_item(), &config(), &json!({ "ids": ["a", "b"] })).unwrap();
        assert_eq!(
            request.url,
            "https://shop.test/store-api/checkout/cart/line-item?id[]=a&id[]=b"
        );
        assert_eq!(request.method, Method::Delete);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_required_query_list() {
        let missing = encode(&delete_line_item(), &config(), &json!({})).unwrap_err();
        assert!(matches!(missing, Fault::MalformedRequest { .. }));
        let empty = encode(&delete_line_item(), &config(), &json!({ "ids": [] })).unwrap_err();
        assert!(matches!(empty, Fault::MalformedRequest { .. }));
    }

    #[test]
    fn test_unknown_parameter_without_body_is_rejected() {
        let err = encode(
            &delete_line_item(),
            &config(),
            &json!({ "ids": ["a"], "quantity": 2 }),
        )
        .unwrap_err();
        match err {
            Fault::MalformedRequest { reason, .. } => assert!(reason.contains("quantity")),
            other => panic!("expected malformed request, got {:?}", other),
        }
    }

    #[test]
    fn test_header_parameter_and_auth_headers() {
        let contract = OperationContract::new(
            "readNavigation",
            Method::Post,
            "/navigation/{activeId}/{rootId}",
        )
        .path_param("activeId")
        .path_param("rootId")
        .header_param(ParamSpec::optional("sw-include-seo-urls", ParamType::Boolean))
        .required_body(SchemaRef::object("NavigationCriteria"));

        let request = encode(
            &contract,
            &config().with_context_token("ctx-9"),
            &json!({
                "activeId": "main-navigation",
                "rootId": "main-navigation",
                "sw-include-seo-urls": true,
                "depth": 2
            }),
        )
        .unwrap();

        assert_eq!(
            request.url,
            "https://shop.test/store-api/navigation/main-navigation/main-navigation"
        );
        assert_eq!(request.header_value("sw-include-seo-urls"), Some("true"));
        assert_eq!(request.header_value("sw-access-key"), Some("SWSC123"));
        assert_eq!(request.header_value("sw-context-token"), Some("ctx-9"));
        assert_eq!(request.header_value("accept"), Some("application/json"));
        assert_eq!(body_json(&request), json!({ "depth": 2 }));
    }

    #[test]
    fn test_declared_type_is_checked() {
        let contract = OperationContract::new("readCart", Method::Get, "/checkout/cart")
            .query_param(ParamSpec::optional("name", ParamType::String));
        let err = encode(&contract, &config(), &json!({ "name": { "x": 1 } })).unwrap_err();
        assert!(matches!(err, Fault::MalformedRequest { .. }));
    }

    #[test]
    fn test_undeclared_template_query_is_appended() {
        let contract = OperationContract::new("readCart", Method::Get, "/checkout/cart")
            .query_param(ParamSpec::optional("name", ParamType::String));
        let request = encode(&contract, &config(), &json!({ "name": "wish list" })).unwrap();
        assert_eq!(request.url, "https://shop.test/store-api/checkout/cart?name=wish%20list");
    }

    #[test]
    fn test_path_values_are_escaped() {
        let request = encode(&read_category(), &config(), &json!({ "navigationId": "a/b c" })).unwrap();
        assert_eq!(request.url, "https://shop.test/store-api/category/a%2Fb%20c?slots");
    }

    #[test]
    fn test_parameters_must_be_an_object() {
        let err = encode(&read_category(), &config(), &json!(["abc"])).unwrap_err();
        assert!(matches!(err, Fault::MalformedRequest { .. }));
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(percent_encode("ä|?"), "%C3%A4%7C%3F");
    }

    #[test]
    fn test_encode_component_keeps_marks() {
        assert_eq!(encode_component("blue shoe"), "blue%20shoe");
        assert_eq!(encode_component("it's (new)!*"), "it's%20(new)!*");
        assert_eq!(encode_component("a&b=c/d"), "a%26b%3Dc%2Fd");
    }

    #[test]
    fn test_path_parameter_type_is_checked() {
        for value in [json!(true), json!({ "id": "abc" }), json!(["abc"])] {
            let err = encode(&read_category(), &config(), &json!({ "navigationId": value }))
                .unwrap_err();
            match err {
                Fault::MalformedRequest { reason, .. } => {
                    assert!(reason.contains("navigationId"), "{}", reason)
                }
                other => panic!("expected malformed request, got {:?}", other),
            }
        }
    }
}
