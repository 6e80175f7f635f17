use http::header::HeaderName;

use super::{label, Responses};
use crate::errors::CongruenceError;
use crate::net::headers::values_of;

/// Expected values of a header: a single value or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedValues(Vec<String>);

impl ExpectedValues {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<&str> for ExpectedValues {
    fn from(v: &str) -> Self {
        ExpectedValues(vec![v.to_string()])
    }
}

impl From<String> for ExpectedValues {
    fn from(v: String) -> Self {
        ExpectedValues(vec![v])
    }
}

impl From<Vec<String>> for ExpectedValues {
    fn from(v: Vec<String>) -> Self {
        ExpectedValues(v)
    }
}

impl From<&[&str]> for ExpectedValues {
    fn from(v: &[&str]) -> Self {
        ExpectedValues(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ExpectedValues {
    fn from(v: [&str; N]) -> Self {
        ExpectedValues(v.iter().map(|s| s.to_string()).collect())
    }
}

impl Responses {
    /// Verifies that every response carries header `name` with exactly the
    /// expected values, in order. The name is matched case-insensitively.
    pub fn header_equal(
        &self,
        name: &str,
        expected: impl Into<ExpectedValues>,
    ) -> Result<(), CongruenceError> {
        let expected = expected.into();
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| CongruenceError::InvalidHeaderName(name.to_string()))?;
        self.ensure_requests()?;

        self.header_values_equal(&name, expected.as_slice())
    }

    /// Verifies that all responses carry identical headers: every header of
    /// every response must appear with the same values on all the others.
    pub fn header_same(&self) -> Result<(), CongruenceError> {
        if self.len() < 2 {
            return Ok(());
        }
        self.ensure_requests()?;

        for resp in self.iter() {
            for name in resp.headers.keys() {
                let values = values_of(&resp.headers, name);
                self.header_values_equal(name, &values)?;
            }
        }

        Ok(())
    }

    // Callers run `ensure_requests` first.
    fn header_values_equal(
        &self,
        name: &HeaderName,
        expected: &[String],
    ) -> Result<(), CongruenceError> {
        for resp in self.iter() {
            let request = label(resp)?;
            let actual = values_of(&resp.headers, name);

            if actual.is_empty() {
                return Err(CongruenceError::HeaderMissing {
                    request,
                    name: canonical_name(name),
                    expected: expected.to_vec(),
                });
            }

            if actual.len() != expected.len() {
                return Err(CongruenceError::HeaderLength {
                    request,
                    name: canonical_name(name),
                    expected: expected.len(),
                    actual: actual.len(),
                });
            }

            for (index, (want, got)) in expected.iter().zip(actual.iter()).enumerate() {
                if want != got {
                    return Err(CongruenceError::HeaderValue {
                        request,
                        name: canonical_name(name),
                        index,
                        expected: want.clone(),
                        actual: got.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// `content-type` -> `Content-Type`, for messages.
fn canonical_name(name: &HeaderName) -> String {
    name.as_str()
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::congruence::test_support::with_headers;

    #[test]
    fn header_name_is_case_insensitive() {
        let responses = Responses::from(vec![
            with_headers("http://a/", &[("Content-Type", "application/json")]),
            with_headers("http://b/", &[("content-type", "application/json")]),
        ]);

        assert!(responses.header_equal("content-type", "application/json").is_ok());
        assert!(responses.header_equal("CONTENT-TYPE", "application/json").is_ok());
    }

    #[test]
    fn missing_header_is_reported() {
        let responses = Responses::from(vec![
            with_headers("http://a/", &[("X-Thing", "1")]),
            with_headers("http://b/", &[]),
        ]);

        let err = responses.header_equal("x-thing", "1").unwrap_err();
        assert!(matches!(err, CongruenceError::HeaderMissing { ref request, ref name, .. }
            if request == "(GET)http://b/" && name == "X-Thing"));
    }

    #[test]
    fn value_count_must_match() {
        let responses = Responses::from(vec![with_headers(
            "http://a/",
            &[("Vary", "Accept"), ("Vary", "Origin")],
        )]);

        let err = responses.header_equal("vary", "Accept").unwrap_err();
        assert!(matches!(
            err,
            CongruenceError::HeaderLength { expected: 1, actual: 2, .. }
        ));

        assert!(responses.header_equal("vary", ["Accept", "Origin"]).is_ok());
    }

    #[test]
    fn values_are_position_sensitive() {
        let responses = Responses::from(vec![with_headers(
            "http://a/",
            &[("Vary", "Accept"), ("Vary", "Origin")],
        )]);

        let err = responses.header_equal("vary", ["Origin", "Accept"]).unwrap_err();
        match err {
            CongruenceError::HeaderValue { index, expected, actual, .. } => {
                assert_eq!(index, 0);
                assert_eq!(expected, "Origin");
                assert_eq!(actual, "Accept");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_header_name_is_rejected() {
        let responses = Responses::from(vec![with_headers("http://a/", &[])]);
        let err = responses.header_equal("bad name", "x").unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn missing_request_reported_before_comparing() {
        let mut orphan = with_headers("http://a/", &[("X-Thing", "1")]);
        orphan.request = None;
        let responses = Responses::from(vec![with_headers("http://a/", &[]), orphan]);

        // the first response lacks the header, but the orphan wins
        let err = responses.header_equal("x-thing", "1").unwrap_err();
        assert_eq!(err, CongruenceError::MissingRequest);
    }

    #[test]
    fn header_same_requires_identical_headers() {
        let same = Responses::from(vec![
            with_headers("http://a/", &[("Content-Type", "text/plain"), ("X-A", "1")]),
            with_headers("http://b/", &[("x-a", "1"), ("content-type", "text/plain")]),
        ]);
        assert!(same.header_same().is_ok());

        let differ = Responses::from(vec![
            with_headers("http://a/", &[("Content-Type", "text/plain")]),
            with_headers("http://b/", &[("Content-Type", "text/html")]),
        ]);
        assert!(matches!(
            differ.header_same().unwrap_err(),
            CongruenceError::HeaderValue { .. }
        ));

        // an extra header on a later response is caught as well
        let extra = Responses::from(vec![
            with_headers("http://a/", &[("X-A", "1")]),
            with_headers("http://b/", &[("X-A", "1"), ("X-B", "2")]),
        ]);
        assert!(matches!(
            extra.header_same().unwrap_err(),
            CongruenceError::HeaderMissing { .. }
        ));
    }

    #[test]
    fn header_same_reports_missing_request_first() {
        let mut orphan = with_headers("http://b/", &[("X-A", "2")]);
        orphan.request = None;
        let responses = Responses::from(vec![
            with_headers("http://a/", &[("X-A", "1"), ("X-B", "1")]),
            orphan,
            with_headers("http://c/", &[]),
        ]);

        assert_eq!(responses.header_same().unwrap_err(), CongruenceError::MissingRequest);
    }

    #[test]
    fn header_same_degenerates_on_small_collections() {
        assert!(Responses::default().header_same().is_ok());
        assert!(Responses::from(vec![with_headers("http://a/", &[("X", "1")])])
            .header_same()
            .is_ok());
    }

    #[test]
    fn canonical_names_for_messages() {
        assert_eq!(canonical_name(&HeaderName::from_static("content-type")), "Content-Type");
        assert_eq!(canonical_name(&HeaderName::from_static("x-custom-thing")), "X-Custom-Thing");
        assert_eq!(canonical_name(&HeaderName::from_static("etag")), "Etag");
    }
}
