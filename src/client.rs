use reqwest::Client as ReqwestClient;
use reqwest::Method;
use url::Url;

use crate::config::{Config, parse_base_url};
use crate::error::{Error, Kind};
use crate::transport::{self, CertificateFiles};
use crate::types::{
    AuthRequest, AuthResponse, CancelRequest, CancelResponse, CollectRequest, CollectResponse,
    SignRequest, SignResponse,
};
use crate::{Result, request};

/// Relying party API client.
///
/// Cloning is cheap and clones share the connection pool. Operations hold no mutable
/// state, so a client can serve concurrent callers. Dropping an operation's future
/// aborts the in-flight request.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: Url,
    user_agent: String,
    client: ReqwestClient,
}

impl Client {
    /// Creates a client over a default HTTP client, without a client certificate.
    ///
    /// The service requires mutual TLS, so this is mostly useful against proxies that
    /// terminate TLS or in tests. See [`Client::from_certificates`].
    pub fn new(config: Config) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http_client(config, client))
    }

    /// Creates a client using the given HTTP client as is. [`Config::timeout`] is not
    /// applied.
    #[must_use]
    pub fn with_http_client(config: Config, client: ReqwestClient) -> Self {
        Self {
            base_url: config.base_url,
            user_agent: config.user_agent,
            client,
        }
    }

    /// Creates a client presenting the certificate and key in `files` and trusting only
    /// the CA in `files`.
    pub fn from_certificates(config: Config, files: &CertificateFiles) -> Result<Self> {
        let client = transport::builder(files)?
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::with_source(Kind::Certificate, e))?;

        Ok(Self::with_http_client(config, client))
    }

    /// Points the client at another base URL, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Starts an authentication order.
    pub async fn auth(&self, request: &AuthRequest) -> Result<AuthResponse> {
        self.post("auth", request).await
    }

    /// Starts a signing order.
    pub async fn sign(&self, request: &SignRequest) -> Result<SignResponse> {
        self.post("sign", request).await
    }

    /// Reports the state of an order.
    ///
    /// Orders start `pending`; call again, typically every two seconds, until the status
    /// is `complete` or `failed`.
    pub async fn collect(&self, request: &CollectRequest) -> Result<CollectResponse> {
        self.post("collect", request).await
    }

    /// Cancels a pending order.
    pub async fn cancel(&self, request: &CancelRequest) -> Result<CancelResponse> {
        self.post("cancel", request).await
    }

    async fn post<Body, Response>(&self, operation: &str, body: &Body) -> Result<Response>
    where
        Body: serde::Serialize + ?Sized,
        Response: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(operation)?;
        request(&self.client, Method::POST, url, &self.user_agent, body).await
    }

    fn endpoint(&self, operation: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                Error::validation(format!("base url {} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .push(operation);
        Ok(url)
    }
}
