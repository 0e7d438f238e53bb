//! Conversions from external infrastructure errors into domain errors.

use peoplegraph_domain::PeopleGraphError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PeopleGraphError);

impl From<InfraError> for PeopleGraphError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PeopleGraphError> for InfraError {
    fn from(value: PeopleGraphError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPeopleGraphError {
    fn into_peoplegraph(self) -> PeopleGraphError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PeopleGraphError */
/* -------------------------------------------------------------------------- */

impl IntoPeopleGraphError for HttpError {
    fn into_peoplegraph(self) -> PeopleGraphError {
        if self.is_timeout() {
            return PeopleGraphError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return PeopleGraphError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return PeopleGraphError::Decode(format!("failed to decode response body: {self}"));
        }

        if self.is_builder() {
            return PeopleGraphError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => PeopleGraphError::Auth(message),
                404 => PeopleGraphError::NotFound(message),
                _ => PeopleGraphError::Api { status: code, message, rate_limit: None },
            };
        }

        PeopleGraphError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_peoplegraph())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → PeopleGraphError */
/* -------------------------------------------------------------------------- */

impl IntoPeopleGraphError for JsonError {
    fn into_peoplegraph(self) -> PeopleGraphError {
        PeopleGraphError::Decode(format!(
            "response body does not match the expected envelope (line {}, column {}): {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_peoplegraph())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → PeopleGraphError */
/* -------------------------------------------------------------------------- */

impl IntoPeopleGraphError for UrlError {
    fn into_peoplegraph(self) -> PeopleGraphError {
        PeopleGraphError::Config(format!("invalid endpoint URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_peoplegraph())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → PeopleGraphError */
/* -------------------------------------------------------------------------- */

impl IntoPeopleGraphError for toml::de::Error {
    fn into_peoplegraph(self) -> PeopleGraphError {
        PeopleGraphError::Config(format!("Invalid TOML format: {self}"))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(value.into_peoplegraph())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
