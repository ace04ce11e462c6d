//! Client configuration
//!
//! The API base origin is the only external setting. Everything else has a
//! default that matches the conventional `{base}/api/{resource}` layout.

use std::time::Duration;

use thiserror::Error;

use crate::types::UpdateMethod;

/// Environment variable holding the API base origin.
pub const API_BASE_ENV: &str = "ADMIN_API_BASE";

const DEFAULT_API_PREFIX: &str = "api";
const DEFAULT_USER_AGENT: &str = concat!("admin-console/", env!("CARGO_PKG_VERSION"));

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `ADMIN_API_BASE` is not set.
    #[error("{} is not set", API_BASE_ENV)]
    MissingBaseUrl,

    /// The base URL is not an http(s) origin.
    #[error("Invalid API base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),
}

/// Settings shared by every resource client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin, without trailing slash (e.g. `https://admin.example.com`).
    pub base_url: String,
    /// Path segment between origin and resource (default `api`).
    pub api_prefix: String,
    /// Verb used for keyed updates.
    pub update_method: UpdateMethod,
    /// Per-request timeout. `None` leaves calls unbounded.
    pub timeout: Option<Duration>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config for the given origin with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            update_method: UpdateMethod::default(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Read the origin from `ADMIN_API_BASE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(API_BASE_ENV).map_err(|_| ConfigError::MissingBaseUrl)?;
        Self::parse(&raw)
    }

    /// Validate and build a config from a raw origin string.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidBaseUrl(trimmed.to_string()))?;
        if host.trim_end_matches('/').is_empty() {
            return Err(ConfigError::InvalidBaseUrl(trimmed.to_string()));
        }

        Ok(Self::new(trimmed))
    }

    #[must_use]
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into().trim_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_update_method(mut self, method: UpdateMethod) -> Self {
        self.update_method = method;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Collection URL for a resource: `{base}/{prefix}/{resource}`.
    pub fn collection_url(&self, resource: &str) -> String {
        let resource = resource.trim_matches('/');
        if self.api_prefix.is_empty() {
            format!("{}/{resource}", self.base_url)
        } else {
            format!("{}/{}/{resource}", self.base_url, self.api_prefix)
        }
    }

    /// Build the underlying HTTP client.
    pub fn build_http_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_trimmed() {
        let config = ClientConfig::new("https://admin.example.com/");
        assert_eq!(config.base_url, "https://admin.example.com");
        assert_eq!(
            config.collection_url("roles"),
            "https://admin.example.com/api/roles"
        );
    }

    #[test]
    fn custom_prefix() {
        let config = ClientConfig::new("http://localhost:8080").with_api_prefix("/v2/admin/");
        assert_eq!(
            config.collection_url("success-indicators"),
            "http://localhost:8080/v2/admin/success-indicators"
        );

        let bare = ClientConfig::new("http://localhost:8080").with_api_prefix("");
        assert_eq!(bare.collection_url("roles"), "http://localhost:8080/roles");
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::new("http://localhost");
        assert_eq!(config.update_method, UpdateMethod::Put);
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("admin-console/"));
    }

    #[test]
    fn parse_accepts_http_origins() {
        assert!(ClientConfig::parse("http://localhost:3000").is_ok());
        assert!(ClientConfig::parse(" https://admin.example.com ").is_ok());
    }

    #[test]
    fn parse_rejects_bad_origins() {
        assert_eq!(
            ClientConfig::parse("").unwrap_err(),
            ConfigError::MissingBaseUrl
        );
        assert!(matches!(
            ClientConfig::parse("ftp://example.com"),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            ClientConfig::parse("https://"),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn http_client_builds() {
        let config = ClientConfig::new("http://localhost").with_timeout(Duration::from_secs(5));
        assert!(config.build_http_client().is_ok());
    }
}
