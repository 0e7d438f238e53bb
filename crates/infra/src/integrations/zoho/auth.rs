//! Bearer credentials for the Zoho People API
//!
//! [`ZohoTokenSource`] exchanges the one-time authorization code at the
//! regional accounts server, caches the issued token and refreshes it shortly
//! before expiry. Concurrent callers share one in-flight exchange.
//! [`StaticTokenProvider`] wraps a pre-issued token for tests and manual runs.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use peoplegraph_common::auth::{TokenResponse, TokenSet};
use peoplegraph_core::ports::AccessTokenProvider;
use peoplegraph_domain::constants::TOKEN_REFRESH_THRESHOLD_SECS;
use peoplegraph_domain::{ConnectorConfig, PeopleGraphError, Result};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::http::HttpClient;

/// Body of a token endpoint reply; the accounts server reports failures
/// with a 200 status and an `error` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum TokenReply {
    Issued(TokenResponse),
    Rejected {
        error: String,
        #[serde(default)]
        error_description: Option<String>,
    },
}

/// OAuth token source for the regional accounts server
pub struct ZohoTokenSource {
    http_client: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
    authorization_code: String,
    redirect_uri: String,
    refresh_threshold_secs: i64,
    cache: Mutex<Option<TokenSet>>,
}

impl ZohoTokenSource {
    /// Create a token source from validated connector settings.
    ///
    /// # Errors
    /// Returns `PeopleGraphError::Config` for missing credentials or an
    /// unknown region code.
    pub fn new(config: &ConnectorConfig) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Self::with_http_client(config, http_client)
    }

    /// Create a token source that sends through `http_client`
    ///
    /// # Errors
    /// Same as [`Self::new`].
    pub fn with_http_client(config: &ConnectorConfig, http_client: HttpClient) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            http_client,
            token_url: config.resolved_token_url()?,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            authorization_code: config.authorization_code.clone(),
            redirect_uri: config.redirect_uri.clone(),
            refresh_threshold_secs: TOKEN_REFRESH_THRESHOLD_SECS,
            cache: Mutex::new(None),
        })
    }

    /// Refresh this many seconds before the cached token expires
    #[must_use]
    pub fn with_refresh_threshold(mut self, seconds: i64) -> Self {
        self.refresh_threshold_secs = seconds;
        self
    }

    /// Accounts endpoint the exchange posts to
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Current token, exchanging or refreshing when the cache is stale.
    ///
    /// # Errors
    /// Returns `PeopleGraphError::Auth` when the accounts server rejects the
    /// exchange, `PeopleGraphError::Network` on transport failure and
    /// `PeopleGraphError::Decode` for an unreadable reply.
    pub async fn token(&self) -> Result<TokenSet> {
        let mut cache = self.cache.lock().await;

        if let Some(current) = cache.as_ref() {
            if !current.is_expired(self.refresh_threshold_secs) {
                return Ok(current.clone());
            }
        }

        let refresh_token = cache.as_ref().and_then(|t| t.refresh_token.clone());
        let mut issued = self.request_token(refresh_token.as_deref()).await?;
        if issued.refresh_token.is_none() {
            issued.refresh_token = refresh_token;
        }

        info!(
            expires_in = issued.expires_in,
            refreshed = cache.is_some(),
            "Obtained Zoho access token"
        );
        *cache = Some(issued.clone());
        Ok(issued)
    }

    /// Drop the cached token so the next call performs a fresh exchange
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    async fn request_token(&self, refresh_token: Option<&str>) -> Result<TokenSet> {
        let mut form: Vec<(&str, &str)> = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        let grant_type = match refresh_token {
            Some(token) => {
                form.push(("refresh_token", token));
                "refresh_token"
            }
            None => {
                form.push(("redirect_uri", self.redirect_uri.as_str()));
                form.push(("code", self.authorization_code.as_str()));
                "authorization_code"
            }
        };
        form.push(("grant_type", grant_type));

        debug!(grant_type, "Requesting Zoho access token");

        let request = self
            .http_client
            .request(Method::POST, &self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(ACCEPT, "application/json")
            .form(&form);

        let response = self.http_client.send(request).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| PeopleGraphError::Network(format!("token reply unreadable: {err}")))?;

        if !status.is_success() {
            return Err(PeopleGraphError::Auth(format!(
                "token endpoint returned HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let reply: TokenReply = serde_json::from_str(&body).map_err(|err| {
            PeopleGraphError::Decode(format!("token endpoint reply is not a token: {err}"))
        })?;

        match reply {
            TokenReply::Issued(response) => Ok(TokenSet::from(response)),
            TokenReply::Rejected { error, error_description } => {
                let detail = error_description.map(|d| format!(" ({d})")).unwrap_or_default();
                Err(PeopleGraphError::Auth(format!("token exchange rejected: {error}{detail}")))
            }
        }
    }
}

impl fmt::Debug for ZohoTokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZohoTokenSource")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("authorization_code", &"[REDACTED]")
            .field("refresh_threshold_secs", &self.refresh_threshold_secs)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AccessTokenProvider for ZohoTokenSource {
    async fn access_token(&self) -> Result<String> {
        self.token().await.map(|token| token.access_token)
    }
}

/// Pre-issued bearer token that never refreshes
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider").field("token", &"[REDACTED]").finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        if self.token.is_empty() {
            return Err(PeopleGraphError::Auth("static access token is empty".into()));
        }
        Ok(self.token.clone())
    }
}
