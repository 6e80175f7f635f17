use super::{label, Responses};
use crate::errors::CongruenceError;

impl Responses {
    /// Verifies that all responses share the first response's status code.
    pub fn status_same(&self) -> Result<(), CongruenceError> {
        if self.len() < 2 {
            return Ok(());
        }

        self.status_equal(self[0].status)
    }

    /// Verifies that every response has status `expected`; reports the first
    /// response that does not.
    pub fn status_equal(&self, expected: u16) -> Result<(), CongruenceError> {
        self.ensure_requests()?;

        for resp in self.iter() {
            if resp.status != expected {
                return Err(CongruenceError::StatusMismatch {
                    request: label(resp)?,
                    actual: resp.status,
                    expected,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::congruence::test_support::resp;
    use crate::congruence::Responses;
    use crate::errors::CongruenceError;

    #[test]
    fn all_matching_statuses_pass() {
        let responses = Responses::from(vec![
            resp("http://localhost/", 200, b""),
            resp("http://localhost/", 200, b""),
            resp("http://localhost/", 200, b""),
        ]);

        assert!(responses.status_equal(200).is_ok());
        assert!(responses.status_same().is_ok());
        assert!(responses.status_equal(201).is_err());
    }

    #[test]
    fn first_mismatch_is_reported() {
        let responses = Responses::from(vec![
            resp("http://localhost/", 200, b""),
            resp("http://bad/", 201, b""),
            resp("http://worse/", 500, b""),
        ]);

        let err = responses.status_equal(200).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bad"), "{msg}");
        assert!(msg.contains("201"), "{msg}");
        assert!(msg.contains("GET"), "{msg}");
        assert!(!msg.contains("worse"), "{msg}");

        let err = responses.status_same().unwrap_err();
        assert_eq!(
            err,
            CongruenceError::StatusMismatch {
                request: "(GET)http://bad/".into(),
                actual: 201,
                expected: 200,
            }
        );
    }

    #[test]
    fn first_response_is_checked_too() {
        let responses = Responses::from(vec![
            resp("http://first/", 404, b""),
            resp("http://localhost/", 200, b""),
        ]);

        let err = responses.status_equal(200).unwrap_err();
        assert!(err.to_string().contains("first"));
    }

    #[test]
    fn same_degenerates_on_small_collections() {
        assert!(Responses::default().status_same().is_ok());
        assert!(Responses::from(vec![resp("http://a/", 503, b"")]).status_same().is_ok());
        assert!(Responses::default().status_equal(200).is_ok());
    }
}
