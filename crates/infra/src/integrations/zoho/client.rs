//! Zoho People forms API client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use peoplegraph_core::ports::{AccessTokenProvider, Lookup, Page, PeopleDirectory};
use peoplegraph_domain::constants::{
    DEFAULT_API_BASE_URL, DEPARTMENT_BY_ID_PATH, DEPARTMENT_RECORDS_PATH, EMPLOYEE_BY_ID_PATH,
    EMPLOYEE_RECORDS_PATH,
};
use peoplegraph_domain::{
    Annotations, ConnectorConfig, Department, Employee, LookupEnvelope, PagedEnvelope,
    PeopleGraphError, Result,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::auth::ZohoTokenSource;
use super::rate_limit::extract_rate_limit;
use super::request::{
    build_url, next_page_token, with_page_index, with_page_limit, with_record_id, QueryMutator,
};
use crate::errors::InfraError;
use crate::http::HttpClient;

const USER_AGENT: &str = concat!("peoplegraph/", env!("CARGO_PKG_VERSION"));

/// Client for the employee and department forms.
///
/// Every call makes exactly one round trip. Rate-limit headers are parsed on
/// every response, successful or not, and travel back as annotations or
/// inside `PeopleGraphError::Api`.
pub struct ZohoPeopleClient {
    http_client: HttpClient,
    base_url: String,
    token_provider: Arc<dyn AccessTokenProvider>,
}

impl ZohoPeopleClient {
    /// Client authenticating through a [`ZohoTokenSource`] built from `config`
    ///
    /// # Errors
    /// Returns `PeopleGraphError::Config` for invalid settings.
    pub fn new(config: &ConnectorConfig) -> Result<Self> {
        let token_source = Arc::new(ZohoTokenSource::new(config)?);
        Self::with_token_provider(config, token_source)
    }

    /// Client using an externally supplied credential source
    ///
    /// # Errors
    /// Returns `PeopleGraphError::Config` if the HTTP client cannot be built.
    pub fn with_token_provider(
        config: &ConnectorConfig,
        token_provider: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .json_headers()
            .build()?;

        let base_url =
            config.api_base_url.clone().unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self { http_client, base_url, token_provider })
    }

    /// Forms API root every path is appended to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list<T>(&self, path: &str, page_size: u32, page_token: &str) -> Result<Page<T>>
    where
        T: DeserializeOwned + Send,
    {
        let (envelope, annotations) = self
            .fetch::<PagedEnvelope<T>>(
                path,
                vec![with_page_index(page_token), with_page_limit(page_size)],
            )
            .await?;

        let has_result = envelope.response.result.is_some();
        if let Some(errors) = &envelope.response.errors {
            debug!(path, errors = %errors, "Listing returned no result");
        }

        let records = envelope.into_records();
        let next_page_token = if has_result {
            next_page_token(page_token, page_size, records.len())?
        } else {
            String::new()
        };

        debug!(
            path,
            page_token,
            records = records.len(),
            next_page_token = %next_page_token,
            "Fetched page"
        );

        Ok(Page { records, next_page_token, annotations })
    }

    async fn lookup<T>(&self, path: &str, id: &str) -> Result<Lookup<T>>
    where
        T: DeserializeOwned + Send,
    {
        let (envelope, annotations) =
            self.fetch::<LookupEnvelope<T>>(path, vec![with_record_id(id)]).await?;
        let records = envelope.into_records();
        debug!(path, id, records = records.len(), "Fetched record by id");

        Ok(Lookup { records, annotations })
    }

    async fn fetch<T>(&self, path: &str, mutators: Vec<QueryMutator>) -> Result<(T, Annotations)>
    where
        T: DeserializeOwned + Send,
    {
        let url = build_url(&self.base_url, path, mutators)?;
        let token = self.token_provider.access_token().await?;

        let request = self.http_client.request(Method::GET, url).bearer_auth(token);
        let response = self.http_client.send(request).await?;

        let status = response.status();
        let rate_limit = extract_rate_limit(status, response.headers())?;
        let mut annotations = Annotations::new();
        annotations.with_rate_limit(rate_limit.clone());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|err| {
                debug!(path, %status, error = %err, "Error body unreadable");
                String::new()
            });
            let message = match body.trim() {
                "" => status.canonical_reason().unwrap_or("request failed").to_string(),
                text => text.to_string(),
            };
            return Err(PeopleGraphError::Api {
                status: status.as_u16(),
                message,
                rate_limit: Some(rate_limit),
            });
        }

        let bytes =
            response.bytes().await.map_err(|err| PeopleGraphError::from(InfraError::from(err)))?;
        let decoded = serde_json::from_slice::<T>(&bytes)
            .map_err(|err| PeopleGraphError::from(InfraError::from(err)))?;

        Ok((decoded, annotations))
    }
}

#[async_trait]
impl PeopleDirectory for ZohoPeopleClient {
    async fn list_employees(&self, page_size: u32, page_token: &str) -> Result<Page<Employee>> {
        self.list(EMPLOYEE_RECORDS_PATH, page_size, page_token).await
    }

    async fn list_departments(
        &self,
        page_size: u32,
        page_token: &str,
    ) -> Result<Page<Department>> {
        self.list(DEPARTMENT_RECORDS_PATH, page_size, page_token).await
    }

    async fn get_employee_by_id(&self, id: &str) -> Result<Lookup<Employee>> {
        self.lookup(EMPLOYEE_BY_ID_PATH, id).await
    }

    async fn get_department_by_id(&self, id: &str) -> Result<Lookup<Department>> {
        self.lookup(DEPARTMENT_BY_ID_PATH, id).await
    }
}
