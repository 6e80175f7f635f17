use url::Url;

use crate::net::headers::merge_header;
use crate::net::request::PreparedRequest;
use crate::net::{urljoin, RequestInfo, Response, Server};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URI {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    Net(#[from] reqwest::Error),
}

/// Sends `request` to `server` and buffers the full response.
///
/// Server default headers are sent first; any header the request sets
/// replaces every server value of the same name.
pub(crate) async fn fetch(
    client: &reqwest::Client,
    server: &Server,
    request: &PreparedRequest,
) -> Result<Response, FetchError> {
    let uri = urljoin::join([server.base_uri(), request.path.as_str()]);
    let url = Url::parse(&uri).map_err(|source| FetchError::InvalidUri {
        uri: uri.clone(),
        source,
    })?;

    let mut headers = server.default_headers();
    merge_header(&mut headers, &request.headers);

    let mut builder = client
        .request(request.method.clone(), url.clone())
        .headers(headers);
    if let Some(body) = &request.body {
        builder = builder.body(body.clone());
    }

    let res = builder.send().await?;

    let status = res.status().as_u16();
    let headers = res.headers().clone();

    // Fetch body. We don't do streaming
    let body = res.bytes().await?.to_vec();

    Ok(Response::new(
        RequestInfo::new(request.method.clone(), url),
        status,
        headers,
        body,
    ))
}
