use std::fmt;

/// A single server that failed during a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerFailure {
    /// Position of the server in the dispatched list.
    pub index: usize,
    /// Base URI of the server.
    pub server: String,
    pub reason: String,
}

impl fmt::Display for ServerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "server {} ({}): {}", self.index, self.server, self.reason)
    }
}

fn join_failures(failures: &[ServerFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\t\n")
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid HTTP method {0:?}")]
    InvalidMethod(String),

    #[error("cannot serialize request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("cannot start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("got errors: {}", join_failures(.0))]
    Transport(Vec<ServerFailure>),
}

impl DispatchError {
    /// Per-server failures, if this was a transport failure.
    pub fn failures(&self) -> &[ServerFailure] {
        match self {
            DispatchError::Transport(failures) => failures,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CongruenceError {
    #[error(
        "failed to check; a response was missing its request. Check for an earlier \
         unhandled dispatch failure before asserting"
    )]
    MissingRequest,

    #[error("{request}: Status was {actual}, expected {expected}")]
    StatusMismatch {
        request: String,
        actual: u16,
        expected: u16,
    },

    #[error("{request}: Expected header {name} to have value {expected:?}, was missing")]
    HeaderMissing {
        request: String,
        name: String,
        expected: Vec<String>,
    },

    #[error("{request}: Expected header {name} to have length {expected}, was {actual}")]
    HeaderLength {
        request: String,
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error(
        "{request}: Expected header {name} to contain value {expected:?} at index {index}, \
         was {actual:?}"
    )]
    HeaderValue {
        request: String,
        name: String,
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),

    #[error("{request}:\nExpected body:\n  {expected}\nReceived body:\n  {received}")]
    BodyMismatch {
        request: String,
        expected: String,
        received: String,
    },
}

impl CongruenceError {
    /// True when the checker was handed bad input rather than finding a
    /// genuine mismatch.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            CongruenceError::MissingRequest | CongruenceError::InvalidHeaderName(_)
        )
    }
}
