//! Connector configuration

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DEPARTMENT_ROLES, DEFAULT_ORGANIZATION_ROLES, DEFAULT_REDIRECT_URI,
    DEFAULT_REQUEST_TIMEOUT_SECS, TOKEN_URL_TEMPLATE,
};
use crate::errors::{PeopleGraphError, Result};

/// Data-center region of a Zoho account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DomainRegion {
    Us,
    Au,
    Eu,
    In,
    Cn,
}

impl DomainRegion {
    /// Host suffix of the accounts server for this region
    #[must_use]
    pub fn host_suffix(self) -> &'static str {
        match self {
            Self::Us => "com",
            Self::Au => "com.au",
            Self::Eu => "eu",
            Self::In => "in",
            Self::Cn => "com.cn",
        }
    }

    /// OAuth token endpoint for this region
    #[must_use]
    pub fn token_url(self) -> String {
        TOKEN_URL_TEMPLATE.replace("{suffix}", self.host_suffix())
    }

    /// Short region code as accepted in configuration
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Au => "AU",
            Self::Eu => "EU",
            Self::In => "IN",
            Self::Cn => "CN",
        }
    }
}

impl FromStr for DomainRegion {
    type Err = PeopleGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" => Ok(Self::Us),
            "AU" => Ok(Self::Au),
            "EU" => Ok(Self::Eu),
            "IN" => Ok(Self::In),
            "CN" => Ok(Self::Cn),
            other => Err(PeopleGraphError::Config(format!(
                "unknown domain account '{other}', expected one of US, AU, EU, IN, CN"
            ))),
        }
    }
}

impl fmt::Display for DomainRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Role name catalogs injected into the connector.
///
/// `department_roles` drives the per-department entitlements;
/// `organization_roles` is the set of role resources listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCatalogs {
    #[serde(default = "default_department_roles")]
    pub department_roles: Vec<String>,
    #[serde(default = "default_organization_roles")]
    pub organization_roles: Vec<String>,
}

impl Default for RoleCatalogs {
    fn default() -> Self {
        Self {
            department_roles: default_department_roles(),
            organization_roles: default_organization_roles(),
        }
    }
}

fn default_department_roles() -> Vec<String> {
    DEFAULT_DEPARTMENT_ROLES.iter().map(ToString::to_string).collect()
}

fn default_organization_roles() -> Vec<String> {
    DEFAULT_ORGANIZATION_ROLES.iter().map(ToString::to_string).collect()
}

fn default_redirect_uri() -> String {
    DEFAULT_REDIRECT_URI.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Connector configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    #[serde(skip_serializing)]
    pub authorization_code: String,
    /// Region code (US, AU, EU, IN, CN)
    pub domain_account: String,
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
    /// Overrides the forms API base URL
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Overrides the region-derived token endpoint
    #[serde(default)]
    pub token_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub roles: RoleCatalogs,
}

impl ConnectorConfig {
    /// Create a configuration with default endpoints and catalogs
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        authorization_code: impl Into<String>,
        domain_account: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authorization_code: authorization_code.into(),
            domain_account: domain_account.into(),
            redirect_uri: default_redirect_uri(),
            api_base_url: None,
            token_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            roles: RoleCatalogs::default(),
        }
    }

    /// Parsed region of `domain_account`
    ///
    /// # Errors
    /// Returns `PeopleGraphError::Config` for an unknown region code.
    pub fn region(&self) -> Result<DomainRegion> {
        self.domain_account.parse()
    }

    /// Token endpoint, honouring the explicit override
    ///
    /// # Errors
    /// Returns `PeopleGraphError::Config` when no override is set and the
    /// region code is unknown.
    pub fn resolved_token_url(&self) -> Result<String> {
        match &self.token_url {
            Some(url) => Ok(url.clone()),
            None => Ok(self.region()?.token_url()),
        }
    }

    /// Check that credentials are present and the region is known
    ///
    /// # Errors
    /// Returns `PeopleGraphError::Config` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("authorization_code", &self.authorization_code),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(PeopleGraphError::Config(format!("{field} must not be empty")));
            }
        }

        if self.token_url.is_none() {
            self.region()?;
        }

        if self.request_timeout_secs == 0 {
            return Err(PeopleGraphError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("authorization_code", &"[REDACTED]")
            .field("domain_account", &self.domain_account)
            .field("redirect_uri", &self.redirect_uri)
            .field("api_base_url", &self.api_base_url)
            .field("token_url", &self.token_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("roles", &self.roles)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_table_maps_to_token_hosts() {
        let cases = [
            ("US", "https://accounts.zoho.com/oauth/v2/token"),
            ("AU", "https://accounts.zoho.com.au/oauth/v2/token"),
            ("EU", "https://accounts.zoho.eu/oauth/v2/token"),
            ("IN", "https://accounts.zoho.in/oauth/v2/token"),
            ("CN", "https://accounts.zoho.com.cn/oauth/v2/token"),
        ];
        for (code, url) in cases {
            let region: DomainRegion = code.parse().unwrap();
            assert_eq!(region.token_url(), url);
            assert_eq!(region.to_string(), code);
        }
    }

    #[test]
    fn region_codes_are_case_insensitive() {
        assert_eq!("eu".parse::<DomainRegion>().unwrap(), DomainRegion::Eu);
    }

    #[test]
    fn unknown_region_is_config_error() {
        let err = "JP".parse::<DomainRegion>().unwrap_err();
        assert!(matches!(err, PeopleGraphError::Config(ref msg) if msg.contains("JP")));
    }

    #[test]
    fn validate_rejects_missing_credentials() {
        let config = ConnectorConfig::new("id", "", "code", "US");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PeopleGraphError::Config(ref msg) if msg.contains("client_secret")));
    }

    #[test]
    fn validate_rejects_unknown_region_without_override() {
        let mut config = ConnectorConfig::new("id", "secret", "code", "XX");
        assert!(config.validate().is_err());

        config.token_url = Some("http://localhost/token".into());
        assert!(config.validate().is_ok());
        assert_eq!(config.resolved_token_url().unwrap(), "http://localhost/token");
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "client_id": "id",
            "client_secret": "secret",
            "authorization_code": "code",
            "domain_account": "IN"
        }"#;
        let config: ConnectorConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.roles.department_roles.len(), 6);
        assert_eq!(config.roles.organization_roles.len(), 5);
        assert_eq!(config.region().unwrap(), DomainRegion::In);
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = ConnectorConfig::new("id", "top-secret", "one-time-code", "US");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("one-time-code"));
    }
}
