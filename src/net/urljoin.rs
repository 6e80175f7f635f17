//! Joining URL fragments into one correctly delimited URL.
//!
//! Fragments are glued with `/` and the result is normalized:
//!
//! - `scheme:/` becomes `scheme://`
//! - runs of `/` collapse to one, except right after the scheme (`://`)
//! - a `/` directly before `?`, `&` or a `#` fragment is dropped (`#!`
//!   hash-bang routes keep their slash)
//! - a second `?` in the query string becomes `&`
//!
//! ```
//! use congruent::net::urljoin::join;
//!
//! assert_eq!(join(["http://host", "foo/bar", "?x=1"]), "http://host/foo/bar?x=1");
//! assert_eq!(
//!     join(["http:", "host///", "a/b", "?x=1", "?y=2"]),
//!     "http://host/a/b?x=1&y=2",
//! );
//! ```

/// Joins URL fragments and normalizes the separators between them.
pub fn join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = parts
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("/");

    normalize(&joined)
}

/// Normalizes separators in an already concatenated URL string.
pub fn normalize(url: &str) -> String {
    let url = url.replace(":/", "://");
    let url = collapse_slashes(&url);
    let url = drop_slash_before_query(&url);
    merge_queries(&url)
}

// A run of slashes collapses to one. When the run follows `:`, whitespace or
// the start of the string, up to two slashes are kept so `http://` and
// protocol-relative `//host` survive.
fn collapse_slashes(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut chars = url.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        if c != '/' {
            out.push(c);
            prev = Some(c);
            continue;
        }

        let mut run = 1;
        while chars.peek() == Some(&'/') {
            chars.next();
            run += 1;
        }

        let keeps_double = match prev {
            None => true,
            Some(p) => p == ':' || p.is_whitespace(),
        };
        let kept = if keeps_double { run.min(2) } else { 1 };
        for _ in 0..kept {
            out.push('/');
        }
        prev = Some('/');
    }

    out
}

fn drop_slash_before_query(url: &str) -> String {
    let chars: Vec<char> = url.chars().collect();
    let mut out = String::with_capacity(url.len());

    for (i, c) in chars.iter().enumerate() {
        if *c == '/' {
            let next = chars.get(i + 1).copied();
            let after = chars.get(i + 2).copied();
            let skip = match next {
                Some('?') | Some('&') => true,
                Some('#') => matches!(after, Some(a) if a != '!'),
                _ => false,
            };
            if skip {
                continue;
            }
        }
        out.push(*c);
    }

    out
}

fn merge_queries(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut seen_query = false;
    let mut in_fragment = false;

    for c in url.chars() {
        match c {
            '#' => {
                in_fragment = true;
                out.push(c);
            }
            '?' if !in_fragment => {
                out.push(if seen_query { '&' } else { '?' });
                seen_query = true;
            }
            _ => out.push(c),
        }
    }

    out
}
