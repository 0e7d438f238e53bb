//! Error classification shared by every PeopleGraph crate.
//!
//! Crate-level errors implement [`ErrorClassification`] so callers can make
//! retry and alerting decisions without matching on concrete variants.
//! [`CommonError`] covers the failures raised by the shared utilities in
//! this crate and converts into each crate's own error type.

use std::time::Duration;

use thiserror::Error;

/// Standard result type using CommonError
pub type CommonResult<T> = Result<T, CommonError>;

/// Failures raised by the shared utilities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonError {
    /// Encoding or decoding of an opaque payload failed
    #[error("Serialization error ({format}): {message}")]
    Serialization { format: String, message: String },

    /// An invariant of the shared state was violated
    #[error("Internal error in '{context}': {message}")]
    Internal { context: String, message: String },
}

impl CommonError {
    /// Create a serialization error with format information
    pub fn serialization<F: Into<String>, S: Into<String>>(format: F, message: S) -> Self {
        Self::Serialization { format: format.into(), message: message.into() }
    }

    /// Create an internal error with context
    pub fn internal<S: Into<String>, C: Into<String>>(message: S, context: C) -> Self {
        Self::Internal { context: context.into(), message: message.into() }
    }
}

impl ErrorClassification for CommonError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Serialization { .. } => ErrorSeverity::Error,
            Self::Internal { .. } => ErrorSeverity::Critical,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("JSON", err.to_string())
    }
}

/// Error classification trait for consistent error handling across crates
///
/// Implementors describe whether a failure is transient, how loudly it should
/// be reported, and whether the remote side suggested a delay.
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient issues such as timeouts, rate limiting
    /// or temporary service unavailability.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;

    /// Get the suggested retry delay if applicable
    ///
    /// Returns `Some(Duration)` when a specific delay is known (for example
    /// from a rate-limit reset header).
    fn retry_after(&self) -> Option<Duration>;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}
