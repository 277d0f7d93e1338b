//! Type-safe API clients that enforce authentication requirements at compile time

pub mod auth;
pub mod error;
pub mod users;

pub use auth::AuthGrant;

use error::ClientError;
use reqwest::{Client, ClientBuilder, Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("roster-client/", env!("CARGO_PKG_VERSION"));

/// Connection state shared by both client flavours
#[derive(Clone)]
struct Transport {
    client: Client,
    base_url: Url,
}

impl Transport {
    fn new(
        base_url: &str,
        timeout: Option<Duration>,
        user_agent: Option<String>,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::Configuration(format!(
                "unsupported base_url scheme: {}",
                base_url.scheme()
            )));
        }

        let mut builder =
            ClientBuilder::new().user_agent(user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.into()));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Resolve path segments against the base URL, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.url(segments))
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.client.execute(request).await?;
        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "request completed");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_status(status, &body))
        }
    }

    /// Execute a request and decode the success body
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute a request whose success body is irrelevant
    async fn execute_discarding_body(&self, request: RequestBuilder) -> Result<(), ClientError> {
        self.send(request).await.map(drop)
    }
}

/// Client for public endpoints that don't require authentication
#[derive(Clone)]
pub struct PublicRosterClient {
    transport: Transport,
}

/// Client for endpoints that require a bearer token
#[derive(Clone)]
pub struct AuthenticatedRosterClient {
    transport: Transport,
    token: String,
}

impl PublicRosterClient {
    /// Create a new public client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        RosterClientBuilder::new().base_url(base_url).build_public()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.transport.base_url.as_str()
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.transport.request(method, segments)
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.transport.execute(request).await
    }

    /// Get an authenticated client sharing this client's connection pool
    pub fn authenticate(&self, token: impl Into<String>) -> AuthenticatedRosterClient {
        AuthenticatedRosterClient {
            transport: self.transport.clone(),
            token: token.into(),
        }
    }
}

impl AuthenticatedRosterClient {
    /// Create a request builder with authentication
    pub fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.transport
            .request(method, segments)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        self.transport.execute(request).await
    }

    pub(crate) async fn execute_discarding_body(&self, request: RequestBuilder) -> Result<(), ClientError> {
        self.transport.execute_discarding_body(request).await
    }
}

/// Type-safe builder that creates the appropriate client type
#[derive(Default)]
pub struct RosterClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl RosterClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    fn transport(self) -> Result<Transport, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        Transport::new(&base_url, self.timeout, self.user_agent)
    }

    /// Build a public client
    pub fn build_public(self) -> Result<PublicRosterClient, ClientError> {
        Ok(PublicRosterClient {
            transport: self.transport()?,
        })
    }
}
