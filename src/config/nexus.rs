//! # Nexus Connection
//!
//! Connection settings for the Nexus configuration API. All three variables
//! are required; the operator refuses to start without them.

use thiserror::Error;
use zeroize::Zeroizing;

pub const NEXUS_URL_ENV: &str = "NEXUS_URL";
pub const NEXUS_USER_ENV: &str = "NEXUS_USER";
pub const NEXUS_PASSWORD_ENV: &str = "NEXUS_PASSWORD";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),
    #[error("NEXUS_URL must be an http(s) URL, got '{0}'")]
    InvalidUrl(String),
}

/// Credentials and base URL of the Nexus instance
#[derive(Clone)]
pub struct NexusConfig {
    /// Base URL without trailing slash, e.g. `https://nexus.example.com`
    pub url: String,
    pub username: String,
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for NexusConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NexusConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl NexusConfig {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(url));
        }
        Ok(Self {
            url: trimmed.to_string(),
            username: username.into(),
            password: Zeroizing::new(password.into()),
        })
    }

    /// Load connection settings from `NEXUS_URL`, `NEXUS_USER` and `NEXUS_PASSWORD`.
    ///
    /// # Errors
    /// Lists every missing or empty variable at once.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut required = |key: &str| {
            let value = lookup(key).filter(|v| !v.trim().is_empty());
            if value.is_none() {
                missing.push(key.to_string());
            }
            value.unwrap_or_default()
        };

        let url = required(NEXUS_URL_ENV);
        let username = required(NEXUS_USER_ENV);
        let password = required(NEXUS_PASSWORD_ENV);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }
        Self::new(url, username, password)
    }
}
