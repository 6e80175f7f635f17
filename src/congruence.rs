//! Congruence checks over a collection of responses.
//!
//! [`Responses`] is what [`Dispatcher::dispatch`](crate::dispatch::Dispatcher::dispatch)
//! returns: one [`Response`] per server, in server order. Each check scans
//! the whole collection and reports the first offending response:
//!
//! | Check | Passes when |
//! |---|---|
//! | [`status_equal`](Responses::status_equal) | every status equals the given code |
//! | [`status_same`](Responses::status_same) | every status equals the first one |
//! | [`header_equal`](Responses::header_equal) | every response carries the header with exactly the given values |
//! | [`header_same`](Responses::header_same) | every response carries the same headers |
//! | [`body_same`](Responses::body_same) | every body is byte-identical |
//! | [`body_content_same`](Responses::body_content_same) | every body is the same JSON document (raw bytes when not JSON) |
//!
//! Checks are independent. [`Responses::check_all`] runs a list of them and
//! collects every failure instead of stopping at the first one.

mod body;
mod header;
mod status;

use std::ops::Deref;

use crate::errors::CongruenceError;
use crate::net::Response;
use crate::util;

pub use header::ExpectedValues;

/// Ordered responses, index-aligned with the servers they came from.
#[derive(Debug, Clone, Default)]
pub struct Responses {
    items: Vec<Response>,
    diff_length: Option<usize>,
}

impl Responses {
    pub fn new(items: Vec<Response>) -> Self {
        Self {
            items,
            diff_length: None,
        }
    }

    /// Overrides the body excerpt length used in mismatch messages. Without
    /// this the `CONGRUENT_MAX_DIFF` environment variable or the default of
    /// 76 bytes applies.
    pub fn with_diff_length(mut self, length: usize) -> Self {
        self.diff_length = Some(length);
        self
    }

    pub fn into_inner(self) -> Vec<Response> {
        self.items
    }

    /// Runs a single check.
    pub fn check(&self, check: &Check) -> Result<(), CongruenceError> {
        match check {
            Check::StatusEqual(code) => self.status_equal(*code),
            Check::StatusSame => self.status_same(),
            Check::HeaderEqual { name, expected } => self.header_equal(name, expected.clone()),
            Check::HeaderSame => self.header_same(),
            Check::BodySame => self.body_same(),
            Check::BodyContentSame => self.body_content_same(),
        }
    }

    /// Runs every check and returns all failures, in check order.
    pub fn check_all(&self, checks: &[Check]) -> Vec<CongruenceError> {
        checks
            .iter()
            .filter_map(|c| self.check(c).err())
            .collect()
    }

    fn excerpt_length(&self) -> usize {
        self.diff_length.unwrap_or_else(util::diff_length)
    }

    /// Fails if any response lost its originating request.
    fn ensure_requests(&self) -> Result<(), CongruenceError> {
        for resp in &self.items {
            label(resp)?;
        }
        Ok(())
    }
}

/// `(METHOD)URL` of the request behind `resp`.
fn label(resp: &Response) -> Result<String, CongruenceError> {
    resp.request
        .as_ref()
        .map(ToString::to_string)
        .ok_or(CongruenceError::MissingRequest)
}

impl Deref for Responses {
    type Target = [Response];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl From<Vec<Response>> for Responses {
    fn from(items: Vec<Response>) -> Self {
        Responses::new(items)
    }
}

impl FromIterator<Response> for Responses {
    fn from_iter<I: IntoIterator<Item = Response>>(iter: I) -> Self {
        Responses::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Responses {
    type Item = Response;
    type IntoIter = std::vec::IntoIter<Response>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Responses {
    type Item = &'a Response;
    type IntoIter = std::slice::Iter<'a, Response>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A congruence check, for running several at once with
/// [`Responses::check_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    StatusEqual(u16),
    StatusSame,
    HeaderEqual {
        name: String,
        expected: ExpectedValues,
    },
    HeaderSame,
    BodySame,
    BodyContentSame,
}
