//! Congruence testing for HTTP services.
//!
//! The same request is sent to several servers at once and the responses are
//! checked for equivalence: status codes, headers, raw bodies, or JSON
//! content.
//!
//! ```no_run
//! use congruent::{Dispatcher, Request, Server};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let servers = vec![
//!     Server::new("https://mkwords.fardog.io/api/v1/", None),
//!     Server::new("http://localhost:3000/api/v1/", None),
//! ];
//!
//! let dispatcher = Dispatcher::new(None)?;
//! let responses = dispatcher.dispatch(&servers, &Request::new("GET", "generate")).await?;
//!
//! responses.status_equal(200)?;
//! responses.header_equal("content-type", "application/json; charset=utf-8")?;
//! # Ok(()) }
//! ```

pub mod config;
pub mod congruence;
pub mod dispatch;
pub mod errors;
pub mod job;
pub mod net;
pub mod util;

pub use config::DispatcherConfig;
pub use congruence::{Check, ExpectedValues, Responses};
pub use dispatch::Dispatcher;
pub use errors::{CongruenceError, DispatchError, ServerFailure};
pub use job::JobConfig;
pub use net::{Body, Credentials, Request, Response, Server};
