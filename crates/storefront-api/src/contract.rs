//! Operation contracts: what an operation accepts and what it returns.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use storefront_transport::Method;

use crate::key::OperationKey;

/// Content type of every request and response body the platform speaks.
pub const JSON: &str = "application/json";

/// How a list value is written into a query string or header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListStyle {
    /// One value, items joined with `|`: `slots=a|b`.
    Pipe,
    /// The key repeated per item: `id[]=a&id[]=b`.
    Bracket,
}

/// Type of a path, query or header parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    /// One of a fixed set of strings.
    Enumerated(Vec<String>),
    /// A list of scalars.
    List(ListStyle),
}

impl ParamType {
    pub fn enumerated<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParamType::Enumerated(values.into_iter().map(Into::into).collect())
    }

    /// Whether `value` fits this type. Scalars are also accepted in their
    /// string spelling, as they travel as text anyway.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ParamType::String, Value::String(_)) => true,
            (ParamType::String, Value::Number(_)) => true,
            (ParamType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (ParamType::Integer, Value::String(s)) => s.parse::<i64>().is_ok(),
            (ParamType::Number, Value::Number(_)) => true,
            (ParamType::Number, Value::String(s)) => s.parse::<f64>().is_ok(),
            (ParamType::Boolean, Value::Bool(_)) => true,
            (ParamType::Boolean, Value::String(s)) => s == "true" || s == "false",
            (ParamType::Enumerated(allowed), Value::String(s)) => allowed.iter().any(|a| a == s),
            (ParamType::List(_), Value::Array(items)) => items.iter().all(is_scalar),
            (ParamType::List(_), value) => is_scalar(value),
            _ => false,
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub ty: ParamType,
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
        }
    }
}

/// Parameters by location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters {
    pub path: Vec<ParamSpec>,
    pub query: Vec<ParamSpec>,
    pub header: Vec<ParamSpec>,
}

impl Parameters {
    /// Look up a parameter declared in any location.
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.path
            .iter()
            .chain(&self.query)
            .chain(&self.header)
            .find(|spec| spec.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.query.is_empty() && self.header.is_empty()
    }
}

/// Outer shape of a named schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Object,
    Array,
    /// An entity search result whose `elements` hold the named entity.
    SearchResult,
}

/// Reference to a named schema, e.g. `ExtendedCategory[]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaRef {
    pub name: String,
    pub shape: Shape,
}

impl SchemaRef {
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: Shape::Object,
        }
    }

    pub fn array(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: Shape::Array,
        }
    }

    pub fn search_result(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: Shape::SearchResult,
        }
    }

    /// Structural check of a decoded body against the outer shape.
    pub fn accepts(&self, value: &Value) -> bool {
        match self.shape {
            Shape::Object => value.is_object(),
            Shape::Array => value.is_array(),
            Shape::SearchResult => value
                .as_object()
                .map(|obj| obj.get("elements").map_or(true, Value::is_array))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            Shape::Object => write!(f, "{}", self.name),
            Shape::Array => write!(f, "{}[]", self.name),
            Shape::SearchResult => write!(f, "EntitySearchResult<{}>", self.name),
        }
    }
}

/// A request body, tagged by content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content_type: String,
    pub schema: SchemaRef,
    pub required: bool,
}

/// What the platform sends for one status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseSchema {
    /// A JSON body of the given schema.
    Json(SchemaRef),
    /// No body.
    NoContent,
    /// The platform's error payload (`{"errors": [...]}`).
    ApiError,
}

/// Everything the dispatcher needs to call one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContract {
    pub key: OperationKey,
    pub parameters: Parameters,
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<u16, ResponseSchema>,
}

impl OperationContract {
    pub fn new(name: &str, method: Method, path: &str) -> Self {
        Self {
            key: OperationKey::new(name, method, path),
            parameters: Parameters::default(),
            request_body: None,
            responses: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.key.name()
    }

    pub fn method(&self) -> Method {
        self.key.method()
    }

    /// Declare a required path parameter.
    pub fn path_param(mut self, name: &str) -> Self {
        self.parameters
            .path
            .push(ParamSpec::required(name, ParamType::String));
        self
    }

    pub fn query_param(mut self, spec: ParamSpec) -> Self {
        self.parameters.query.push(spec);
        self
    }

    /// Declare a header parameter; its name becomes part of the key.
    pub fn header_param(mut self, spec: ParamSpec) -> Self {
        self.key = self.key.with_header(spec.name.clone());
        self.parameters.header.push(spec);
        self
    }

    /// Declare an optional JSON body.
    pub fn body(mut self, schema: SchemaRef) -> Self {
        self.request_body = Some(RequestBody {
            content_type: JSON.to_string(),
            schema,
            required: false,
        });
        self
    }

    /// Declare a required JSON body.
    pub fn required_body(mut self, schema: SchemaRef) -> Self {
        self.request_body = Some(RequestBody {
            content_type: JSON.to_string(),
            schema,
            required: true,
        });
        self
    }

    pub fn response(mut self, status: u16, schema: ResponseSchema) -> Self {
        self.responses.insert(status, schema);
        self
    }

    /// Shorthand for a `200` JSON response.
    pub fn ok(self, schema: SchemaRef) -> Self {
        self.response(200, ResponseSchema::Json(schema))
    }

    /// Schema registered for `status`, if any.
    pub fn response_for(&self, status: u16) -> Option<&ResponseSchema> {
        self.responses.get(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_keeps_header_in_key() {
        let contract = OperationContract::new(
            "readNavigation",
            Method::Post,
            "/navigation/{activeId}/{rootId}",
        )
        .path_param("activeId")
        .path_param("rootId")
        .header_param(ParamSpec::optional("sw-include-seo-urls", ParamType::Boolean))
        .ok(SchemaRef::array("Category"));

        assert_eq!(
            contract.key.to_string(),
            "readNavigation post /navigation/{activeId}/{rootId} sw-include-seo-urls"
        );
        assert_eq!(contract.parameters.get("rootId").map(|p| p.required), Some(true));
        assert_eq!(contract.response_for(200), Some(&ResponseSchema::Json(SchemaRef::array("Category"))));
        assert_eq!(contract.response_for(404), None);
    }

    #[test]
    fn test_param_type_accepts() {
        assert!(ParamType::Boolean.accepts(&json!(true)));
        assert!(ParamType::Boolean.accepts(&json!("false")));
        assert!(!ParamType::Boolean.accepts(&json!(1)));
        assert!(ParamType::Integer.accepts(&json!(3)));
        assert!(!ParamType::Integer.accepts(&json!(3.5)));
        assert!(ParamType::List(ListStyle::Bracket).accepts(&json!(["a", "b"])));
        assert!(!ParamType::List(ListStyle::Bracket).accepts(&json!([{ "a": 1 }])));
        assert!(ParamType::enumerated(["a", "b"]).accepts(&json!("a")));
        assert!(!ParamType::enumerated(["a", "b"]).accepts(&json!("c")));
    }

    #[test]
    fn test_schema_shapes() {
        assert!(SchemaRef::array("Category").accepts(&json!([])));
        assert!(!SchemaRef::array("Category").accepts(&json!({})));
        assert!(SchemaRef::search_result("Product").accepts(&json!({ "elements": [] })));
        assert!(!SchemaRef::search_result("Product").accepts(&json!({ "elements": {} })));
        assert_eq!(SchemaRef::search_result("SeoUrl").to_string(), "EntitySearchResult<SeoUrl>");
    }
}
