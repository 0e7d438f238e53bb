use std::time::Duration;

use peoplegraph_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use peoplegraph_domain::PeopleGraphError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with a timeout and default headers.
///
/// Each [`HttpClient::send`] is exactly one round trip; failures surface to
/// the caller without replay.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, PeopleGraphError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request once.
    ///
    /// Any response, whatever its status, is returned to the caller; transport
    /// failures map through [`InfraError`].
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, PeopleGraphError> {
        let request = builder.build().map_err(|err| PeopleGraphError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        debug!(%method, path = request.url().path(), "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    /// Overall deadline for a single request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `User-Agent` sent on every request
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Headers sent on every request
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Send `Accept` and `Content-Type: application/json` on every request
    pub fn json_headers(self) -> Self {
        let mut headers = self.default_headers.clone().unwrap_or_default();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.default_headers(headers)
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `PeopleGraphError::InvalidInput` when reqwest rejects the
    /// settings.
    pub fn build(self) -> Result<HttpClient, PeopleGraphError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| PeopleGraphError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
