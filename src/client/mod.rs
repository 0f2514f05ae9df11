//! Client layer: one dispatcher for every operation, plus the thin per-endpoint wrappers.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::USER_AGENT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::{
    ApiKey, BoundTerminals, CreateIntegrationPayment, CreatePaymentLink, IntegrationPayment,
    IntegrationPaymentMethods, PaymentLink, PaymentLinkDetails, PaymentLinkId, PaymentLinkMethods,
    Response,
};
use crate::transport::{
    BuildError, HttpTransport, Payload, ReqwestTransport, RequestOptions, build_request,
    decode_envelope,
};

mod error;

pub use error::{BoldError, ErrorKind};

/// Production host of the Bold integrations API.
pub const DEFAULT_BASE_URL: &str = "https://integrations.api.bold.co";

const PAYMENT_LINK_PATH: &str = "/online/link/v1";
const PAYMENT_LINK_METHODS_PATH: &str = "/online/link/v1/payment_methods";
const INTEGRATION_PAYMENT_PATH: &str = "/payments/app-checkout";
const BOUND_TERMINALS_PATH: &str = "/payments/binded-terminals";
const INTEGRATION_METHODS_PATH: &str = "/payments/payment-methods";

/// One remote operation: verb, path, log label and optional JSON body.
struct Endpoint<'a, B: ?Sized> {
    method: Method,
    path: Cow<'a, str>,
    action: &'static str,
    body: Option<&'a B>,
}

impl<'a> Endpoint<'a, ()> {
    fn get(path: impl Into<Cow<'a, str>>, action: &'static str) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            action,
            body: None,
        }
    }
}

impl<'a, B: ?Sized> Endpoint<'a, B> {
    fn post(path: impl Into<Cow<'a, str>>, action: &'static str, body: &'a B) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            action,
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`BoldClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent, or the
/// underlying `reqwest::Client`.
pub struct BoldClientBuilder {
    api_key: ApiKey,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl BoldClientBuilder {
    /// Create a builder with the production host and no overrides.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            http_client: None,
        }
    }

    /// Override the API host. An empty value keeps the production host.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = if base_url.trim().is_empty() {
            DEFAULT_BASE_URL.to_owned()
        } else {
            base_url.trim().to_owned()
        };
        self
    }

    /// Per-call timeout. Zero means the 30 second default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use this `reqwest::Client` instead of the process-wide shared one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build a [`BoldClient`].
    ///
    /// Fails with [`BoldError::Build`] when the base URL is not an absolute http(s) URL.
    pub fn build(self) -> Result<BoldClient, BoldError> {
        let parsed = Url::parse(&self.base_url).map_err(|source| BuildError::InvalidUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BuildError::UnsupportedScheme {
                scheme: parsed.scheme().to_owned(),
            }
            .into());
        }

        let http: Arc<dyn HttpTransport> = match self.http_client {
            Some(client) => Arc::new(ReqwestTransport::new(client)),
            None => {
                let shared: Arc<ReqwestTransport> =
                    ReqwestTransport::shared().map_err(BoldError::Network)?;
                shared
            }
        };

        Ok(BoldClient {
            api_key: self.api_key,
            base_url: self.base_url,
            timeout: self.timeout,
            user_agent: self.user_agent,
            http,
        })
    }
}

#[derive(Clone)]
/// High-level Bold client.
///
/// Every operation goes through one dispatcher that builds the request, executes it,
/// classifies the status code and decodes the body. Clones share the transport, so a
/// client can be cloned freely and used from many tasks at once.
///
/// Calls are cancelled by dropping the returned future.
pub struct BoldClient {
    api_key: ApiKey,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for BoldClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoldClient")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl BoldClient {
    /// Create a client against the production host using the shared transport.
    ///
    /// For more customization, use [`BoldClient::builder`].
    pub fn new(api_key: ApiKey) -> Result<Self, BoldError> {
        BoldClientBuilder::new(api_key).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> BoldClientBuilder {
        BoldClientBuilder::new(api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A clone of this client whose calls use `timeout`. The transport is shared.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self.clone()
        }
    }

    /// Create a payment link.
    ///
    /// `POST /online/link/v1`
    pub async fn create_payment_link(
        &self,
        request: &CreatePaymentLink,
    ) -> Result<PaymentLink, BoldError> {
        self.send::<_, Payload<PaymentLink>>(Endpoint::post(
            PAYMENT_LINK_PATH,
            "create payment link",
            request,
        ))
        .await
        .map(Payload::into_inner)
    }

    /// Fetch the current state of a payment link.
    ///
    /// `GET /online/link/v1/{id}`. This response is not wrapped in `payload`.
    pub async fn get_payment_link(
        &self,
        id: &PaymentLinkId,
    ) -> Result<PaymentLinkDetails, BoldError> {
        let path = format!("{PAYMENT_LINK_PATH}/{id}");
        self.send(Endpoint::get(path, "get payment link")).await
    }

    /// Payment methods usable in links, with their amount limits.
    ///
    /// `GET /online/link/v1/payment_methods`
    pub async fn get_payment_link_methods(&self) -> Result<PaymentLinkMethods, BoldError> {
        self.send::<_, Payload<PaymentLinkMethods>>(Endpoint::get(
            PAYMENT_LINK_METHODS_PATH,
            "get payment link methods",
        ))
        .await
        .map(Payload::into_inner)
    }

    /// Start a payment on a physical terminal.
    ///
    /// `POST /payments/app-checkout`
    pub async fn create_integration_payment(
        &self,
        request: &CreateIntegrationPayment,
    ) -> Result<IntegrationPayment, BoldError> {
        self.send::<_, Payload<IntegrationPayment>>(Endpoint::post(
            INTEGRATION_PAYMENT_PATH,
            "create integration payment",
            request,
        ))
        .await
        .map(Payload::into_inner)
    }

    /// `GET /payments/binded-terminals`
    pub async fn get_bound_terminals(&self) -> Result<BoundTerminals, BoldError> {
        self.send::<_, Payload<BoundTerminals>>(Endpoint::get(
            BOUND_TERMINALS_PATH,
            "get bound terminals",
        ))
        .await
        .map(Payload::into_inner)
    }

    /// `GET /payments/payment-methods`
    pub async fn get_integration_payment_methods(
        &self,
    ) -> Result<IntegrationPaymentMethods, BoldError> {
        self.send::<_, Payload<IntegrationPaymentMethods>>(Endpoint::get(
            INTEGRATION_METHODS_PATH,
            "get integration payment methods",
        ))
        .await
        .map(Payload::into_inner)
    }

    /// Build, execute, classify and decode one call.
    ///
    /// Outcomes:
    /// - transport failure: [`BoldError::Network`], nothing decoded,
    /// - status outside `200..300`: [`BoldError::RemoteRejected`] with the raw body,
    /// - undecodable 2xx body: [`BoldError::MalformedResponse`],
    /// - non-empty `errors`: [`BoldError::Validation`] carrying the decoded value.
    #[instrument(
        skip(self, endpoint),
        fields(action = endpoint.action, method = %endpoint.method, path = %endpoint.path)
    )]
    async fn send<B, T>(&self, endpoint: Endpoint<'_, B>) -> Result<T, BoldError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned + Into<Response>,
    {
        let headers = self
            .user_agent
            .iter()
            .map(|agent| (USER_AGENT.as_str().to_owned(), agent.clone()))
            .collect::<Vec<_>>();
        let request = build_request(
            &self.base_url,
            &self.api_key,
            RequestOptions {
                method: endpoint.method,
                path: &endpoint.path,
                query: &[],
                headers: &headers,
                body: endpoint.body,
                timeout: self.timeout,
            },
        )?;

        debug!(url = %request.url, "dispatching request");
        let response = self
            .http
            .execute(request)
            .await
            .map_err(BoldError::Network)?;
        debug!(status = response.status, bytes = response.body.len(), "response received");

        if !(200..300).contains(&response.status) {
            return Err(BoldError::RemoteRejected {
                status: response.status,
                body: response.body,
                headers: response.headers,
            });
        }

        let decoded = decode_envelope::<T>(&response.body)?;
        if !decoded.errors.is_empty() {
            debug!(entries = decoded.errors.len(), "response reported field errors");
            return Err(BoldError::Validation {
                errors: decoded.errors,
                partial: Box::new(decoded.value.into()),
            });
        }

        Ok(decoded.value)
    }
}
