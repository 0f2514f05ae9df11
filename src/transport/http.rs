use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::transport::request::PreparedRequest;

/// Timeout applied when a call does not set one (or sets zero).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type TransportError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
}

/// One HTTP exchange. Implementations must be safe to share across concurrent calls.
pub trait HttpTransport: Send + Sync {
    fn execute(
        &self,
        request: PreparedRequest,
    ) -> BoxFuture<'_, Result<RawResponse, TransportError>>;
}

/// Process-wide connection pool, built on first use.
static SHARED_TRANSPORT: LazyLock<Result<Arc<ReqwestTransport>, Arc<reqwest::Error>>> =
    LazyLock::new(|| {
        reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map(|client| Arc::new(ReqwestTransport { client }))
            .map_err(Arc::new)
    });

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// The shared transport. Every call returns the same instance.
    pub fn shared() -> Result<Arc<Self>, TransportError> {
        match &*SHARED_TRANSPORT {
            Ok(transport) => Ok(Arc::clone(transport)),
            Err(err) => Err(Box::new(Arc::clone(err))),
        }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: PreparedRequest,
    ) -> BoxFuture<'_, Result<RawResponse, TransportError>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method, request.url)
                .headers(request.headers)
                .timeout(effective_timeout(request.timeout));
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            // The body is read to the end so the connection goes back to the pool.
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();
            Ok(RawResponse {
                status,
                body,
                headers,
            })
        })
    }
}

pub fn effective_timeout(timeout: Option<Duration>) -> Duration {
    timeout
        .filter(|timeout| !timeout.is_zero())
        .unwrap_or(DEFAULT_TIMEOUT)
}
