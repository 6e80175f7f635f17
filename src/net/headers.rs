use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("invalid header name {0:?}")]
    InvalidName(String),

    #[error("invalid value for header {name}")]
    InvalidValue { name: String },
}

/// Merges `src` into `dest`. Every header name present in `src` replaces all
/// existing values of that name in `dest`; multiple values in `src` are all
/// carried over, in order.
pub fn merge_header(dest: &mut HeaderMap, src: &HeaderMap) {
    for name in src.keys() {
        dest.remove(name);
        for value in src.get_all(name) {
            dest.append(name.clone(), value.clone());
        }
    }
}

/// Merges each map in turn, so later maps win over earlier ones.
pub fn merge_headers<'a, I>(dest: &mut HeaderMap, sources: I)
where
    I: IntoIterator<Item = &'a HeaderMap>,
{
    for src in sources {
        merge_header(dest, src);
    }
}

/// Builds a header map from string pairs. Repeated names are appended.
pub fn header_map<I, K, V>(pairs: I) -> Result<HeaderMap, HeaderError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut map = HeaderMap::new();

    for (k, v) in pairs {
        let name = HeaderName::from_bytes(k.as_ref().as_bytes())
            .map_err(|_| HeaderError::InvalidName(k.as_ref().to_string()))?;
        let value = HeaderValue::from_str(v.as_ref()).map_err(|_| HeaderError::InvalidValue {
            name: k.as_ref().to_string(),
        })?;
        map.append(name, value);
    }

    Ok(map)
}

/// All values of `name`, in order, rendered as strings.
///
/// Values that are not visible ASCII are decoded lossily.
pub fn values_of(map: &HeaderMap, name: &HeaderName) -> Vec<String> {
    map.get_all(name)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect()
}
