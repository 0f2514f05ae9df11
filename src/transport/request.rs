use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::domain::ApiKey;

/// Scheme prefix of the `Authorization` header value.
pub const AUTH_SCHEME: &str = "x-api-key";

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid request URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme: {scheme}")]
    UnsupportedScheme { scheme: String },

    #[error("invalid header: {name}")]
    InvalidHeader { name: String },

    #[error("request body cannot be encoded as JSON: {0}")]
    Body(#[source] serde_json::Error),
}

/// Everything needed to assemble one outbound request.
///
/// `headers` are applied in order, so a repeated name keeps its last value.
pub struct RequestOptions<'a, B: ?Sized> {
    pub method: Method,
    pub path: &'a str,
    pub query: &'a [(String, String)],
    pub headers: &'a [(String, String)],
    pub body: Option<&'a B>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

/// Assemble a request against `base_url`.
///
/// Query parameters are appended to any query already present in `path`. A JSON body gets
/// `Content-Type: application/json` unless the caller set a content type. `Accept` and the
/// credential header are always set last and cannot be overridden.
pub fn build_request<B>(
    base_url: &str,
    api_key: &ApiKey,
    options: RequestOptions<'_, B>,
) -> Result<PreparedRequest, BuildError>
where
    B: Serialize + ?Sized,
{
    let raw = format!("{}{}", base_url.trim_end_matches('/'), options.path);
    let mut url = Url::parse(&raw).map_err(|source| BuildError::InvalidUrl {
        url: raw.clone(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BuildError::UnsupportedScheme {
            scheme: url.scheme().to_owned(),
        });
    }
    if !options.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in options.query {
            pairs.append_pair(key, value);
        }
    }

    let mut headers = HeaderMap::new();
    for (name, value) in options.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| BuildError::InvalidHeader { name: name.clone() })?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| BuildError::InvalidHeader { name: name.clone() })?;
        headers.insert(header_name, value);
    }

    let body = match options.body {
        Some(body) => {
            let bytes = serde_json::to_vec(body).map_err(BuildError::Body)?;
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            }
            Some(bytes)
        }
        None => None,
    };

    headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
    let mut credential = HeaderValue::from_str(&format!("{AUTH_SCHEME} {}", api_key.as_str()))
        .map_err(|_| BuildError::InvalidHeader {
            name: AUTHORIZATION.as_str().to_owned(),
        })?;
    credential.set_sensitive(true);
    headers.insert(AUTHORIZATION, credential);

    Ok(PreparedRequest {
        method: options.method,
        url,
        headers,
        body,
        timeout: options.timeout,
    })
}
