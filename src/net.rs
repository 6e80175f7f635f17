//! Network layer: servers, requests, responses, and sending one request to
//! one server.

pub mod fetch;
pub mod headers;
pub mod request;
pub mod response;
pub mod server;
pub mod urljoin;

pub use fetch::FetchError;
pub use request::{Body, Request, RequestInfo};
pub use response::Response;
pub use server::{basic_auth, Credentials, Server};
