//! Concurrent dispatch of one request to many servers.
//!
//! [`Dispatcher::dispatch`] spawns one task per server. Every task tags its
//! result with the index of its server and sends it over a shared channel;
//! the join step waits for exactly as many results as tasks were spawned and
//! places each response back at its server's position. The returned
//! [`Responses`] are therefore in input order no matter which server answered
//! first.
//!
//! Dispatch is all-or-nothing: if any server fails, the whole call fails with
//! [`DispatchError::Transport`] listing every failed server, and the
//! responses that did arrive are discarded.
//!
//! There are no retries and no timeouts beyond those of the HTTP client.

use std::sync::Arc;

use http::Method;
use tokio::sync::mpsc;

use crate::config::DispatcherConfig;
use crate::congruence::Responses;
use crate::errors::{DispatchError, ServerFailure};
use crate::net::fetch::{fetch, FetchError};
use crate::net::request::PreparedRequest;
use crate::net::{Request, Response, Server};

type TaggedResult = (usize, Result<Response, FetchError>);

/// Sends requests to sets of servers.
///
/// Holds one HTTP client that is shared (connection pool included) by every
/// dispatch. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
}

impl Dispatcher {
    /// Creates a dispatcher. If `config` is `None`,
    /// [`DispatcherConfig::default`] is used.
    pub fn new(config: Option<DispatcherConfig>) -> Result<Self, DispatchError> {
        let config = config.unwrap_or_default();
        let client = config.client().map_err(DispatchError::Client)?;

        Ok(Self { client })
    }

    /// Dispatches `request` to every server concurrently and returns the
    /// responses in the order of `servers`.
    ///
    /// Each server is handled by its own spawned task. Dropping the returned
    /// future does not cancel them: requests already started run to
    /// completion and their results are discarded.
    pub async fn dispatch(
        &self,
        servers: &[Server],
        request: &Request,
    ) -> Result<Responses, DispatchError> {
        if servers.is_empty() {
            return Ok(Responses::default());
        }

        let prepared = Arc::new(prepare(request)?);
        let n = servers.len();

        log::debug!(
            "dispatching {} {} to {} servers",
            prepared.method,
            prepared.path,
            n
        );

        let (tx, mut rx) = mpsc::channel::<TaggedResult>(n);

        for (index, server) in servers.iter().enumerate() {
            let tx = tx.clone();
            let client = self.client.clone();
            let server = server.clone();
            let prepared = prepared.clone();

            tokio::spawn(async move {
                let result = fetch(&client, &server, &prepared).await;
                let _ = tx.send((index, result)).await;
            });
        }
        // Only the tasks hold senders now, so the channel closes if they all die
        drop(tx);

        let mut slots: Vec<Option<Response>> = (0..n).map(|_| None).collect();
        let mut failures = Vec::new();
        let mut received = 0;

        while received < n {
            let Some((index, result)) = rx.recv().await else {
                break;
            };
            received += 1;

            match result {
                Ok(resp) => {
                    log::debug!("server {index} answered {}", resp.status);
                    slots[index] = Some(resp);
                }
                Err(e) => {
                    log::warn!("server {index} ({}) failed: {e}", servers[index].base_uri());
                    failures.push(ServerFailure {
                        index,
                        server: servers[index].base_uri().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // A task that panicked never reports back
        if received < n {
            for (index, slot) in slots.iter().enumerate() {
                let reported = failures.iter().any(|f| f.index == index);
                if slot.is_none() && !reported {
                    failures.push(ServerFailure {
                        index,
                        server: servers[index].base_uri().to_string(),
                        reason: "request task ended without a result".to_string(),
                    });
                }
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|f| f.index);
            return Err(DispatchError::Transport(failures));
        }

        Ok(slots.into_iter().flatten().collect::<Vec<_>>().into())
    }

    /// Runs [`dispatch`](Self::dispatch) to completion on a private
    /// current-thread runtime.
    ///
    /// Must not be called from within an async context.
    pub fn dispatch_blocking(
        &self,
        servers: &[Server],
        request: &Request,
    ) -> Result<Responses, DispatchError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(DispatchError::Runtime)?;

        runtime.block_on(self.dispatch(servers, request))
    }
}

/// Validates the method and resolves the body once for all servers.
fn prepare(request: &Request) -> Result<PreparedRequest, DispatchError> {
    let method = Method::from_bytes(request.method().as_bytes())
        .map_err(|_| DispatchError::InvalidMethod(request.method().to_string()))?;

    let body = request.body().map(|b| b.to_bytes()).transpose()?;

    Ok(PreparedRequest {
        method,
        path: request.path().to_string(),
        headers: request.headers().clone(),
        body,
    })
}
