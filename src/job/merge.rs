//! Merging per-server overrides over the `_global` server defaults.
//!
//! The rules are spelled out per field instead of relying on a generic
//! reflective merge:
//!
//! - scalars (`base_uri`, auth fields): the override wins when present
//! - maps (`headers`): merged key by key, the override wins per key
//! - nested structs (`authentication`): merged recursively
//! - lists: the override replaces the default wholesale

use std::collections::BTreeMap;

use super::{AuthDef, ServerDef};

pub trait Merge {
    /// Returns `self` with `over` merged on top of it.
    fn merge(&self, over: &Self) -> Self;
}

impl<T: Clone> Merge for Option<T> {
    fn merge(&self, over: &Self) -> Self {
        over.clone().or_else(|| self.clone())
    }
}

impl<V: Clone> Merge for BTreeMap<String, V> {
    fn merge(&self, over: &Self) -> Self {
        let mut merged = self.clone();
        for (k, v) in over {
            merged.insert(k.clone(), v.clone());
        }
        merged
    }
}

impl<T: Clone> Merge for Vec<T> {
    fn merge(&self, over: &Self) -> Self {
        if over.is_empty() {
            self.clone()
        } else {
            over.clone()
        }
    }
}

impl Merge for AuthDef {
    fn merge(&self, over: &Self) -> Self {
        AuthDef {
            kind: self.kind.merge(&over.kind),
            username: self.username.merge(&over.username),
            password: self.password.merge(&over.password),
        }
    }
}

impl Merge for ServerDef {
    fn merge(&self, over: &Self) -> Self {
        let authentication = match (&self.authentication, &over.authentication) {
            (Some(base), Some(o)) => Some(base.merge(o)),
            (base, o) => base.merge(o),
        };

        ServerDef {
            headers: self.headers.merge(&over.headers),
            authentication,
            base_uri: self.base_uri.merge(&over.base_uri),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn scalar_override_wins_when_present() {
        let base: Option<String> = Some("a".into());
        assert_eq!(base.merge(&Some("b".into())), Some("b".into()));
        assert_eq!(base.merge(&None), Some("a".into()));
        assert_eq!(None::<String>.merge(&None), None);
    }

    #[test]
    fn maps_merge_per_key() {
        let base = headers(&[("X-A", "1"), ("X-B", "1")]);
        let over = headers(&[("X-B", "2"), ("X-C", "2")]);

        assert_eq!(
            base.merge(&over),
            headers(&[("X-A", "1"), ("X-B", "2"), ("X-C", "2")])
        );
    }

    #[test]
    fn lists_are_replaced_wholesale() {
        let base = vec![1, 2, 3];
        assert_eq!(base.merge(&vec![9]), vec![9]);
        assert_eq!(base.merge(&vec![]), vec![1, 2, 3]);
    }

    #[test]
    fn server_defs_merge_deeply() {
        let global = ServerDef {
            headers: headers(&[("X-Env", "test"), ("Accept", "application/json")]),
            authentication: Some(AuthDef {
                kind: Some("basic".into()),
                username: Some("global-user".into()),
                password: Some("global-pass".into()),
            }),
            base_uri: None,
        };
        let server = ServerDef {
            headers: headers(&[("X-Env", "prod")]),
            authentication: Some(AuthDef {
                kind: None,
                username: Some("prod-user".into()),
                password: None,
            }),
            base_uri: Some("http://prod/".into()),
        };

        let merged = global.merge(&server);

        assert_eq!(merged.base_uri.as_deref(), Some("http://prod/"));
        assert_eq!(
            merged.headers,
            headers(&[("X-Env", "prod"), ("Accept", "application/json")])
        );
        let auth = merged.authentication.unwrap();
        assert_eq!(auth.kind.as_deref(), Some("basic"));
        assert_eq!(auth.username.as_deref(), Some("prod-user"));
        assert_eq!(auth.password.as_deref(), Some("global-pass"));
    }

    #[test]
    fn server_without_overrides_inherits_everything() {
        let global = ServerDef {
            headers: headers(&[("X-A", "1")]),
            authentication: None,
            base_uri: Some("http://default/".into()),
        };

        let merged = global.merge(&ServerDef::default());
        assert_eq!(merged, global);
    }
}
