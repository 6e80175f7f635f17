//! Declarative job files.
//!
//! A job describes a set of servers and the requests to run against each of
//! them:
//!
//! ```json
//! {
//!   "_global": {
//!     "headers": { "Accept": "application/json" },
//!     "authentication": { "type": "basic", "username": "u", "password": "p" }
//!   },
//!   "servers": [
//!     { "base_uri": "https://old.example.com/api/v1/" },
//!     { "base_uri": "http://localhost:3000/api/v1/", "headers": { "X-Env": "dev" } }
//!   ],
//!   "requests": [
//!     { "method": "GET", "path": "generate" },
//!     { "method": "POST", "path": "items", "body": { "name": "x" } }
//!   ]
//! }
//! ```
//!
//! Every entry of `servers` is merged over `_global` (see [`merge`]) before
//! being turned into a [`Server`].

pub mod merge;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::net::headers::{header_map, HeaderError};
use crate::net::{Credentials, Request, Server};
use merge::Merge;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid job file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("server {index} has no base_uri")]
    MissingBaseUri { index: usize },

    #[error(transparent)]
    InvalidHeader(#[from] HeaderError),

    #[error("unsupported authentication type {0:?}")]
    UnsupportedAuth(String),
}

/// Authentication data, encoded into an `Authorization` header on dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthDef {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl AuthDef {
    /// An untyped block with no username or password yields no credentials.
    fn credentials(&self) -> Result<Option<Credentials>, ConfigError> {
        let untyped = match self.kind.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(kind) if kind.eq_ignore_ascii_case("basic") => false,
            Some(kind) => return Err(ConfigError::UnsupportedAuth(kind.to_string())),
        };

        let blank = |v: &Option<String>| v.as_deref().map_or(true, str::is_empty);
        if untyped && blank(&self.username) && blank(&self.password) {
            return Ok(None);
        }

        Ok(Some(Credentials::basic(
            self.username.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
        )))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDef {
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub authentication: Option<AuthDef>,
    #[serde(default)]
    pub base_uri: Option<String>,
}

impl ServerDef {
    fn resolve(&self, index: usize) -> Result<Server, ConfigError> {
        let base_uri = self
            .base_uri
            .clone()
            .ok_or(ConfigError::MissingBaseUri { index })?;
        let headers = header_map(&self.headers)?;

        let mut server = Server::new(base_uri, Some(headers));
        let credentials = match &self.authentication {
            Some(auth) => auth.credentials()?,
            None => None,
        };
        if let Some(credentials) = credentials {
            server = server.with_credentials(credentials);
        }

        Ok(server)
    }
}

fn default_method() -> String {
    "GET".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDef {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// A JSON string is sent verbatim, anything else is serialized.
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

impl RequestDef {
    fn resolve(&self) -> Result<Request, ConfigError> {
        let headers = header_map(&self.headers)?;
        let mut request = Request::new(self.method.clone(), self.path.clone()).with_headers(headers);

        match &self.body {
            None | Some(serde_json::Value::Null) => {}
            Some(body) => request = request.with_body(body.clone()),
        }

        Ok(request)
    }
}

/// A whole job: server defaults, servers and requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(rename = "_global", default)]
    pub global: ServerDef,
    #[serde(default)]
    pub servers: Vec<ServerDef>,
    #[serde(default)]
    pub requests: Vec<RequestDef>,
}

impl JobConfig {
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&data)
    }

    /// Server definitions merged over the `_global` defaults.
    pub fn resolved_server_defs(&self) -> Vec<ServerDef> {
        self.servers.iter().map(|s| self.global.merge(s)).collect()
    }

    pub fn servers(&self) -> Result<Vec<Server>, ConfigError> {
        self.resolved_server_defs()
            .iter()
            .enumerate()
            .map(|(index, def)| def.resolve(index))
            .collect()
    }

    pub fn requests(&self) -> Result<Vec<Request>, ConfigError> {
        self.requests.iter().map(RequestDef::resolve).collect()
    }
}
