//! Operation keys and path templates.
//!
//! An operation key reads `<name> <method> <path-template>[ <header-names>]`,
//! e.g. `readNavigation post /navigation/{activeId}/{rootId} sw-include-seo-urls`.

use std::fmt;
use std::str::FromStr;

use storefront_transport::Method;
use thiserror::Error;

/// Errors raised while parsing an operation key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Operation key is empty")]
    Empty,

    #[error("Operation key `{key}` is missing its {part}")]
    Missing { key: String, part: &'static str },

    #[error("Operation key `{key}` has an invalid method `{method}`")]
    InvalidMethod { key: String, method: String },

    #[error("Operation key `{key}` has a path that does not start with `/`")]
    InvalidPath { key: String },
}

/// One piece of the path part of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Literal(String),
    Placeholder(String),
}

/// One item of the query part of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryItem {
    /// A bare parameter name, e.g. `slots`.
    Name(String),
    /// A literal key bound to a placeholder, e.g. `id[]={ids}`.
    Placeholder { key: String, param: String },
    /// A fixed `key=value` pair.
    Fixed { key: String, value: String },
}

impl QueryItem {
    /// The parameter this item reads, if any.
    pub fn param(&self) -> Option<&str> {
        match self {
            QueryItem::Name(name) => Some(name),
            QueryItem::Placeholder { param, .. } => Some(param),
            QueryItem::Fixed { .. } => None,
        }
    }
}

/// A path with `{name}` placeholders and an optional query part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<PathSegment>,
    query: Vec<QueryItem>,
}

impl PathTemplate {
    /// Parse a template. An unterminated `{` is kept as literal text.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw.as_str(), None),
        };
        let segments = parse_segments(path);
        let query = query.map(parse_query).unwrap_or_default();
        Self {
            raw,
            segments,
            query,
        }
    }

    /// The template exactly as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn query(&self) -> &[QueryItem] {
        &self.query
    }

    /// Names of the path placeholders, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Placeholder(name) => Some(name.as_str()),
            PathSegment::Literal(_) => None,
        })
    }

    /// Whether the template reads `param` anywhere, in the path or the query.
    pub fn mentions(&self, param: &str) -> bool {
        self.placeholders().any(|name| name == param)
            || self.query.iter().any(|item| item.param() == Some(param))
    }
}

fn parse_segments(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            segments.push(PathSegment::Literal(rest[..open].to_string()));
        }
        segments.push(PathSegment::Placeholder(rest[open + 1..close].to_string()));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        segments.push(PathSegment::Literal(rest.to_string()));
    }
    segments
}

fn parse_query(query: &str) -> Vec<QueryItem> {
    query
        .split('&')
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once('=') {
            None => QueryItem::Name(item.to_string()),
            Some((key, value)) => match value.strip_prefix('{').and_then(|v| v.strip_suffix('}')) {
                Some(param) => QueryItem::Placeholder {
                    key: key.to_string(),
                    param: param.to_string(),
                },
                None => QueryItem::Fixed {
                    key: key.to_string(),
                    value: value.to_string(),
                },
            },
        })
        .collect()
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A parsed operation key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationKey {
    name: String,
    method: Method,
    path: PathTemplate,
    headers: Vec<String>,
}

impl OperationKey {
    pub fn new(name: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: PathTemplate::new(path),
            headers: Vec::new(),
        }
    }

    /// Append a header name to the key.
    pub fn with_header(mut self, name: impl Into<String>) -> Self {
        self.headers.push(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &PathTemplate {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.method.as_key_str(), self.path)?;
        for header in &self.headers {
            write!(f, " {}", header)?;
        }
        Ok(())
    }
}

impl FromStr for OperationKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().ok_or(KeyError::Empty)?;
        let missing = |part| KeyError::Missing {
            key: s.to_string(),
            part,
        };

        let method = parts.next().ok_or_else(|| missing("method"))?;
        let method: Method = method.parse().map_err(|_| KeyError::InvalidMethod {
            key: s.to_string(),
            method: method.to_string(),
        })?;

        let path = parts.next().ok_or_else(|| missing("path"))?;
        if !path.starts_with('/') {
            return Err(KeyError::InvalidPath { key: s.to_string() });
        }

        let key = parts.fold(OperationKey::new(name, method, path), OperationKey::with_header);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_and_print_round_trip() {
        for key in [
            "readCategory post /category/{navigationId}?slots",
            "readNavigation post /navigation/{activeId}/{rootId} sw-include-seo-urls",
            "deleteLineItem delete /checkout/cart/line-item?id[]={ids}",
            "readContext get /context",
        ] {
            let parsed: OperationKey = key.parse().unwrap();
            assert_eq!(parsed.to_string(), key);
        }
    }

    #[test]
    fn test_parsed_parts() {
        let key: OperationKey = "readNavigation post /navigation/{activeId}/{rootId} sw-include-seo-urls"
            .parse()
            .unwrap();
        assert_eq!(key.name(), "readNavigation");
        assert_eq!(key.method(), Method::Post);
        assert_eq!(key.path().placeholders().collect::<Vec<_>>(), vec!["activeId", "rootId"]);
        assert_eq!(key.headers(), ["sw-include-seo-urls".to_string()]);
    }

    #[test]
    fn test_query_items() {
        let template = PathTemplate::new("/checkout/cart/line-item?id[]={ids}&slots&mode=full");
        assert_eq!(
            template.query(),
            [
                QueryItem::Placeholder {
                    key: "id[]".to_string(),
                    param: "ids".to_string()
                },
                QueryItem::Name("slots".to_string()),
                QueryItem::Fixed {
                    key: "mode".to_string(),
                    value: "full".to_string()
                },
            ]
        );
        assert!(template.mentions("ids"));
        assert!(template.mentions("slots"));
        assert!(!template.mentions("mode"));
    }

    #[test]
    fn test_unterminated_placeholder_is_literal() {
        let template = PathTemplate::new("/category/{navigationId");
        assert_eq!(
            template.segments(),
            [PathSegment::Literal("/category/{navigationId".to_string())]
        );
    }

    #[test]
    fn test_invalid_keys() {
        assert_eq!("".parse::<OperationKey>(), Err(KeyError::Empty));
        assert!(matches!(
            "readCart".parse::<OperationKey>(),
            Err(KeyError::Missing { part: "method", .. })
        ));
        assert!(matches!(
            "readCart fetch /checkout/cart".parse::<OperationKey>(),
            Err(KeyError::InvalidMethod { .. })
        ));
        assert!(matches!(
            "readCart get checkout/cart".parse::<OperationKey>(),
            Err(KeyError::InvalidPath { .. })
        ));
    }
}
