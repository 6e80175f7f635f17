//! Byte helpers shared by the congruence checks.
//!
//! Mismatched bodies are never dumped whole into an error message. They are
//! cut down to an excerpt of [`DEFAULT_DIFF_LENGTH`] bytes, which can be
//! overridden with the `CONGRUENT_MAX_DIFF` environment variable.

use std::env;

/// Default number of body bytes shown in a mismatch diagnostic.
pub const DEFAULT_DIFF_LENGTH: usize = 76;

/// Environment variable overriding [`DEFAULT_DIFF_LENGTH`].
pub const MAX_DIFF_ENV: &str = "CONGRUENT_MAX_DIFF";

const TRUNCATION_MARKER: &str = "...";

/// Returns true when both byte sequences have the same length and the same
/// byte at every index. No content-type shortcuts are taken.
pub fn bytes_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b.iter()).all(|(x, y)| x == y)
}

/// Parses an excerpt length override. Only positive integers are accepted;
/// anything else yields `None`.
pub fn parse_diff_length(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// Excerpt length from the environment, or [`DEFAULT_DIFF_LENGTH`].
pub fn diff_length() -> usize {
    let raw = env::var(MAX_DIFF_ENV).ok();
    parse_diff_length(raw.as_deref()).unwrap_or(DEFAULT_DIFF_LENGTH)
}

/// Cuts `body` down to at most `limit` bytes for display, appending `...`
/// when anything was removed.
///
/// Invalid UTF-8 (including a multibyte character split at the limit) is
/// rendered lossily.
pub fn excerpt(body: &[u8], limit: usize) -> String {
    if body.len() <= limit {
        return String::from_utf8_lossy(body).into_owned();
    }

    let mut out = String::from_utf8_lossy(&body[..limit]).into_owned();
    out.push_str(TRUNCATION_MARKER);
    out
}
