//! Configuration loader
//!
//! Loads connector configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is checked with
//! [`ConnectorConfig::validate`] before it is returned.
//!
//! ## Environment Variables
//! - `PEOPLEGRAPH_CLIENT_ID`: OAuth client id (required)
//! - `PEOPLEGRAPH_CLIENT_SECRET`: OAuth client secret (required)
//! - `PEOPLEGRAPH_AUTH_CODE`: One-time authorization code (required)
//! - `PEOPLEGRAPH_DOMAIN_ACCOUNT`: Region code `US`, `AU`, `EU`, `IN` or `CN`
//!   (required)
//! - `PEOPLEGRAPH_REDIRECT_URI`: Redirect URI registered with the client
//! - `PEOPLEGRAPH_API_BASE_URL`: Overrides the forms API base URL
//! - `PEOPLEGRAPH_TOKEN_URL`: Overrides the region-derived token endpoint
//! - `PEOPLEGRAPH_REQUEST_TIMEOUT_SECS`: Per-request timeout in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./peoplegraph.json` or `./peoplegraph.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use peoplegraph_domain::{ConnectorConfig, PeopleGraphError, Result};

use crate::errors::InfraError;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `PeopleGraphError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or the region code is unknown
pub fn load() -> Result<ConnectorConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `PeopleGraphError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<ConnectorConfig> {
    let mut config = ConnectorConfig::new(
        env_var("PEOPLEGRAPH_CLIENT_ID")?,
        env_var("PEOPLEGRAPH_CLIENT_SECRET")?,
        env_var("PEOPLEGRAPH_AUTH_CODE")?,
        env_var("PEOPLEGRAPH_DOMAIN_ACCOUNT")?,
    );

    if let Some(redirect_uri) = env_opt("PEOPLEGRAPH_REDIRECT_URI") {
        config.redirect_uri = redirect_uri;
    }
    config.api_base_url = env_opt("PEOPLEGRAPH_API_BASE_URL");
    config.token_url = env_opt("PEOPLEGRAPH_TOKEN_URL");

    if let Some(timeout) = env_opt("PEOPLEGRAPH_REQUEST_TIMEOUT_SECS") {
        config.request_timeout_secs = timeout.parse::<u64>().map_err(|e| {
            PeopleGraphError::Config(format!("Invalid request timeout '{timeout}': {e}"))
        })?;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PeopleGraphError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ConnectorConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PeopleGraphError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PeopleGraphError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PeopleGraphError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`); a path
/// without an extension is read as JSON.
///
/// # Errors
/// Returns `PeopleGraphError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<ConnectorConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| PeopleGraphError::from(InfraError::from(e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PeopleGraphError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PeopleGraphError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const FILE_NAMES: [&str; 6] = [
        "config.json",
        "config.toml",
        "peoplegraph.json",
        "peoplegraph.toml",
        "../config.json",
        "../config.toml",
    ];

    let mut roots = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|candidate| candidate.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `PeopleGraphError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        PeopleGraphError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Optional environment variable; blank values count as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
