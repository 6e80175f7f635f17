use std::fmt;

use http::{HeaderMap, Method};
use serde::Serialize;
use url::Url;

/// Request body, resolved to bytes once per dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Sent verbatim.
    Text(String),
    /// Sent verbatim.
    Bytes(Vec<u8>),
    /// Serialized as JSON when the request is dispatched.
    Json(serde_json::Value),
}

impl Body {
    /// Converts any serializable value into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Body::Json)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Body::Text(s) => Ok(s.as_bytes().to_vec()),
            Body::Bytes(b) => Ok(b.clone()),
            Body::Json(v) => serde_json::to_vec(v),
        }
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Text(s)
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(b: Vec<u8>) -> Self {
        Body::Bytes(b)
    }
}

impl From<serde_json::Value> for Body {
    /// A JSON string is treated as a raw text body, like in job files.
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => Body::Text(s),
            other => Body::Json(other),
        }
    }
}

/// One logical test case, dispatched unchanged against every server.
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    path: String,
    headers: HeaderMap,
    body: Option<Body>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Headers that override the server-level defaults.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self, serde_json::Error> {
        Ok(self.with_body(Body::json(value)?))
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }
}

/// Method and resolved URL of a dispatched request, kept on each response
/// for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: Method,
    pub url: Url,
}

impl RequestInfo {
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url }
    }
}

impl fmt::Display for RequestInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}){}", self.method, self.url)
    }
}

/// A request whose method and body have been validated and resolved, ready
/// to be sent to any number of servers.
#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}
