//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::BTreeMap;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built HTTP request, as handed to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBuilder {
    pub method: Method,
    pub url: String,
    /// Header names are stored as given; lookups are case-insensitive.
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Get a header value.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_sets_content_type() {
        let request = RequestBuilder::new(Method::Post, "http://localhost:9090/api/auth/login")
            .json(&serde_json::json!({ "email": "a@b.co" }))
            .unwrap();
        assert_eq!(request.header_value("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(br#"{"email":"a@b.co"}"#.as_slice()));
    }

    #[test]
    fn test_bearer_auth() {
        let request = RequestBuilder::new(Method::Get, "/products").bearer_auth("tok");
        assert_eq!(request.header_value("Authorization"), Some("Bearer tok"));
    }
}
