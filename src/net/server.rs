use base64::Engine;
use http::header::{HeaderValue, AUTHORIZATION};
use http::HeaderMap;

/// Builds an `Authorization` header value for HTTP basic authentication.
pub fn basic_auth(username: &str, password: &str) -> String {
    let encoded =
        base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

/// Credential material attached to a server.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
}

impl Credentials {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        match self {
            Credentials::Basic { username, password } => basic_auth(username, password),
        }
    }
}

// Keep passwords out of logs and panic messages.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// A target that requests are dispatched against.
///
/// Servers are immutable once built and cheap to clone, so the same server
/// can serve many dispatches at once.
#[derive(Debug, Clone)]
pub struct Server {
    base_uri: String,
    headers: HeaderMap,
    credentials: Option<Credentials>,
}

impl Server {
    pub fn new(base_uri: impl Into<String>, headers: Option<HeaderMap>) -> Self {
        Self {
            base_uri: base_uri.into(),
            headers: headers.unwrap_or_default(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Server-level headers sent with every request, including the
    /// `Authorization` header derived from the credentials. Headers set
    /// explicitly on the server take precedence over the credentials.
    pub fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(creds) = &self.credentials {
            if let Ok(value) = HeaderValue::from_str(&creds.header_value()) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        crate::net::headers::merge_header(&mut headers, &self.headers);

        headers
    }
}
