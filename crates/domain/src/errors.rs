//! Error types used throughout the connector

use std::time::Duration;

use chrono::Utc;
use peoplegraph_common::error::{CommonError, ErrorClassification, ErrorSeverity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::RateLimitDescription;

/// Main error type for PeopleGraph
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PeopleGraphError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Rate limit header error: {0}")]
    RateLimit(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String, rate_limit: Option<RateLimitDescription> },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Pagination error: {0}")]
    Pagination(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for PeopleGraph operations
pub type Result<T> = std::result::Result<T, PeopleGraphError>;

impl PeopleGraphError {
    /// Rate-limit metadata attached to an API error, if any
    #[must_use]
    pub fn rate_limit(&self) -> Option<&RateLimitDescription> {
        match self {
            Self::Api { rate_limit, .. } => rate_limit.as_ref(),
            _ => None,
        }
    }
}

impl ErrorClassification for PeopleGraphError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(_) => ErrorSeverity::Info,
            Self::Network(_) => ErrorSeverity::Warning,
            Self::Api { status, .. } if *status == 429 => ErrorSeverity::Warning,
            Self::Internal(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    fn retry_after(&self) -> Option<Duration> {
        let reset_at = self.rate_limit()?.reset_at?;
        (reset_at - Utc::now()).to_std().ok()
    }
}

impl From<CommonError> for PeopleGraphError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::Serialization { .. } => Self::Pagination(err.to_string()),
            CommonError::Internal { .. } => Self::Internal(err.to_string()),
        }
    }
}
