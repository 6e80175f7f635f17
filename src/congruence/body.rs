use serde_json::{Number, Value};

use super::{label, Responses};
use crate::errors::CongruenceError;
use crate::net::Response;
use crate::util::{bytes_equal, excerpt};

impl Responses {
    /// Verifies that every body is byte-identical to the one before it.
    ///
    /// On mismatch both bodies are cut to the excerpt length (76 bytes unless
    /// overridden by `CONGRUENT_MAX_DIFF` or [`Responses::with_diff_length`]).
    pub fn body_same(&self) -> Result<(), CongruenceError> {
        if self.len() < 2 {
            return Ok(());
        }
        self.ensure_requests()?;

        let limit = self.excerpt_length();
        for pair in self.windows(2) {
            let (prev, resp) = (&pair[0], &pair[1]);
            if !bytes_equal(&prev.body, &resp.body) {
                return Err(CongruenceError::BodyMismatch {
                    request: label(resp)?,
                    expected: excerpt(&prev.body, limit),
                    received: excerpt(&resp.body, limit),
                });
            }
        }

        Ok(())
    }

    /// Verifies that every body holds the same JSON document as the one
    /// before it, ignoring formatting and object key order.
    ///
    /// A body that does not parse as JSON is compared as raw bytes instead.
    /// So a JSON body never matches a non-JSON one.
    pub fn body_content_same(&self) -> Result<(), CongruenceError> {
        if self.len() < 2 {
            return Ok(());
        }
        self.ensure_requests()?;

        let limit = self.excerpt_length();
        let canonical: Vec<Vec<u8>> = self.iter().map(canonical_body).collect();

        for i in 1..canonical.len() {
            if !bytes_equal(&canonical[i - 1], &canonical[i]) {
                return Err(CongruenceError::BodyMismatch {
                    request: label(&self[i])?,
                    expected: excerpt(&canonical[i - 1], limit),
                    received: excerpt(&canonical[i], limit),
                });
            }
        }

        Ok(())
    }
}

// serde_json's default map is ordered by key, so re-serializing gives a
// stable form regardless of the server's key order and whitespace.
fn canonical_body(resp: &Response) -> Vec<u8> {
    match serde_json::from_slice::<Value>(&resp.body) {
        Ok(mut value) => {
            normalize_numbers(&mut value);
            serde_json::to_vec(&value).unwrap_or_else(|_| resp.body.clone())
        }
        Err(e) => {
            log::debug!("body is not JSON ({e}), comparing raw bytes");
            resp.body.clone()
        }
    }
}

/// Rewrites every number as an `f64`, so `1`, `1.0` and `1e0` all print the
/// same way. Integers beyond 2^53 lose precision.
fn normalize_numbers(value: &mut Value) {
    match value {
        Value::Number(n) => {
            if let Some(f) = n.as_f64().and_then(Number::from_f64) {
                *n = f;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_numbers),
        Value::Object(map) => map.values_mut().for_each(normalize_numbers),
        Value::Null | Value::Bool(_) | Value::String(_) => {}
    }
}
