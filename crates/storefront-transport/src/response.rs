//! Responses as delivered by a transport, before any contract is applied.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

/// Status, headers and the undecoded body of a platform response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response carrying a JSON body.
    pub fn json_body(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let headers = HashMap::from([("Content-Type".to_string(), "application/json".to_string())]);
        Self::new(status, headers, body.into())
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the body is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// The body as text; invalid UTF-8 is replaced.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Header lookup, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, body: &[u8]) -> HttpResponse {
        HttpResponse::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_success_range() {
        assert!(raw(204, b"").is_success());
        assert!(!raw(199, b"").is_success());
        assert!(!raw(302, b"").is_success());
    }

    #[test]
    fn test_whitespace_body_is_empty() {
        assert!(raw(200, b" \n").is_empty());
        assert!(!raw(200, b"[]").is_empty());
    }

    #[test]
    fn test_lossy_text_and_json() {
        assert_eq!(raw(502, &[b'o', b'k', 0xff]).text_lossy(), "ok\u{fffd}");
        let elements: Vec<u32> = raw(200, b"[1, 2]").json().unwrap();
        assert_eq!(elements, vec![1, 2]);
        assert!(raw(200, b"<html>").json::<Vec<u32>>().is_err());
    }

    #[test]
    fn test_json_body_header() {
        let response = HttpResponse::json_body(200, "{}");
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("sw-context-token"), None);
    }
}
