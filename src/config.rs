// src/config.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
//! Connection settings for the S3 endpoint, read from the environment
//! (after `.env` has been loaded).

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::constants::{
    DEFAULT_ENDPOINT_SCHEME, DEFAULT_REGION, ENV_ACCESS_KEY_ID, ENV_DEFAULT_REGION,
    ENV_ENDPOINT_URL, ENV_REGION, ENV_SECRET_ACCESS_KEY,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} is set but empty")]
    Empty(&'static str),

    #[error("{var} is not a valid endpoint: {value}")]
    InvalidEndpoint { var: &'static str, value: String },
}

/// Everything needed to build an authenticated client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint_url: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

// Keep the secret out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

impl ClientConfig {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("loaded environment from {}", path.display()),
            Err(e) => debug!("no .env file loaded: {e}"),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match lookup(name) {
                None => Err(ConfigError::Missing(name)),
                Some(v) if v.trim().is_empty() => Err(ConfigError::Empty(name)),
                Some(v) => Ok(v),
            }
        };

        let endpoint_url = normalize_endpoint(&required(ENV_ENDPOINT_URL)?)?;
        let access_key_id = required(ENV_ACCESS_KEY_ID)?;
        let secret_access_key = required(ENV_SECRET_ACCESS_KEY)?;

        let region = lookup(ENV_DEFAULT_REGION)
            .filter(|r| !r.trim().is_empty())
            .or_else(|| lookup(ENV_REGION).filter(|r| !r.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            endpoint_url,
            access_key_id,
            secret_access_key,
            region,
        })
    }
}

/// Turn `host[:port]` into a URL. Values that already carry an http(s) scheme
/// are kept, minus any trailing slash.
pub fn normalize_endpoint(raw: &str) -> Result<String, ConfigError> {
    let raw = raw.trim();
    let url = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("{DEFAULT_ENDPOINT_SCHEME}{raw}")
    };
    let url = url.trim_end_matches('/').to_string();

    let host = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    if host.is_empty() || host.contains(char::is_whitespace) || host.contains("://") {
        return Err(ConfigError::InvalidEndpoint {
            var: ENV_ENDPOINT_URL,
            value: raw.to_string(),
        });
    }
    Ok(url)
}
