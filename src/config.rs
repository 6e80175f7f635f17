//! Dispatcher configuration.
//!
//! `DispatcherConfig` controls the HTTP client shared by every dispatch. It
//! provides defaults via [`Default`] and a fluent
//! [`DispatcherConfig::builder()`] with validation.
//!
//! # Examples
//!
//! ```rust
//! use congruent::config::DispatcherConfig;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = DispatcherConfig::builder()
//!     .user_agent("congruent/0.1")
//!     .max_redirects(3)
//!     .build()?;
//! assert_eq!(cfg.max_redirects, 3);
//! # Ok(()) }
//! ```
//!
//! # Fields (summary)
//! - `user_agent`: Optional `User-Agent` sent with every request.
//! - `follow_redirects`: Follow redirects (default: `true`).
//! - `max_redirects`: Redirect hop limit when following (default: 10).
//!
//! There is deliberately no timeout setting: a hung server hangs its dispatch.

use std::fmt;

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub user_agent: Option<String>,
    pub follow_redirects: bool,
    pub max_redirects: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            follow_redirects: true,
            max_redirects: 10,
        }
    }
}

impl DispatcherConfig {
    pub fn builder() -> DispatcherConfigBuilder {
        DispatcherConfigBuilder::default()
    }

    pub(crate) fn client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let policy = if self.follow_redirects {
            reqwest::redirect::Policy::limited(self.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let mut builder = reqwest::Client::builder().redirect(policy);
        if let Some(ua) = &self.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        builder.build()
    }
}

/// Builder for [`DispatcherConfig`].
#[derive(Debug, Clone, Default)]
pub struct DispatcherConfigBuilder {
    inner: DispatcherConfig,
}

impl DispatcherConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut DispatcherConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn user_agent<S: Into<String>>(self, ua: S) -> Self { self.map(|c| c.user_agent = Some(ua.into())) }
    pub fn follow_redirects(self, on: bool) -> Self { self.map(|c| c.follow_redirects = on) }
    pub fn max_redirects(self, n: usize) -> Self { self.map(|c| c.max_redirects = n) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<DispatcherConfig, DispatcherConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

// ---------- Validation ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatcherConfigError {
    ZeroRedirects,
    EmptyUserAgent,
}

impl fmt::Display for DispatcherConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatcherConfigError::ZeroRedirects =>
                write!(f, "max_redirects must be at least 1 when following redirects"),
            DispatcherConfigError::EmptyUserAgent =>
                write!(f, "user_agent must not be empty"),
        }
    }
}
impl std::error::Error for DispatcherConfigError {}

fn validate(c: &DispatcherConfig) -> Result<(), DispatcherConfigError> {
    if c.follow_redirects && c.max_redirects == 0 {
        return Err(DispatcherConfigError::ZeroRedirects);
    }
    if matches!(&c.user_agent, Some(ua) if ua.trim().is_empty()) {
        return Err(DispatcherConfigError::EmptyUserAgent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_redirects() {
        let cfg = DispatcherConfig::default();
        assert!(cfg.follow_redirects);
        assert_eq!(cfg.max_redirects, 10);
        assert!(cfg.user_agent.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let cfg = DispatcherConfig::builder()
            .user_agent("congruent-test")
            .follow_redirects(false)
            .max_redirects(0)
            .build()
            .unwrap();

        assert_eq!(cfg.user_agent.as_deref(), Some("congruent-test"));
        assert!(!cfg.follow_redirects);
    }

    #[test]
    fn zero_redirects_rejected_when_following() {
        let err = DispatcherConfig::builder().max_redirects(0).build().unwrap_err();
        assert_eq!(err, DispatcherConfigError::ZeroRedirects);
    }

    #[test]
    fn blank_user_agent_rejected() {
        let err = DispatcherConfig::builder().user_agent("  ").build().unwrap_err();
        assert_eq!(err, DispatcherConfigError::EmptyUserAgent);
        assert_eq!(err.to_string(), "user_agent must not be empty");
    }

    #[test]
    fn client_builds_from_defaults() {
        assert!(DispatcherConfig::default().client().is_ok());
    }
}
