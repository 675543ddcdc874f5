//! Connection configuration: where the platform lives and how to authenticate.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header carrying the sales channel access key (Store API).
pub const ACCESS_KEY_HEADER: &str = "sw-access-key";
/// Header carrying the session / cart token (Store API).
pub const CONTEXT_TOKEN_HEADER: &str = "sw-context-token";

/// Environment variables read by [`ApiConfig::from_env`].
pub const ENV_STORE_DOMAIN: &str = "SHOPWARE_STORE_DOMAIN";
pub const ENV_ACCESS_TOKEN: &str = "SHOPWARE_ACCESS_TOKEN";
pub const ENV_API_TYPE: &str = "SHOPWARE_API_TYPE";
pub const ENV_CONTEXT_TOKEN: &str = "SHOPWARE_CONTEXT_TOKEN";

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid API type: {0} (expected store-api or admin-api)")]
    InvalidApiType(String),
}

/// Which platform API to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiType {
    #[default]
    StoreApi,
    AdminApi,
}

impl ApiType {
    /// Path segment appended to the store domain.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiType::StoreApi => "store-api",
            ApiType::AdminApi => "admin-api",
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "store-api" => Ok(ApiType::StoreApi),
            "admin-api" => Ok(ApiType::AdminApi),
            other => Err(ConfigError::InvalidApiType(other.to_string())),
        }
    }
}

/// Platform connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Store domain, e.g. `https://shop.example.com`.
    pub store_domain: String,

    /// API flavour.
    #[serde(default)]
    pub api_type: ApiType,

    /// Sales channel access key (Store API) or bearer token (Admin API).
    pub access_token: String,

    /// Session / cart token.
    #[serde(default)]
    pub context_token: Option<String>,

    /// Per-request timeout in milliseconds, applied by `Dispatcher::timed`.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl ApiConfig {
    pub fn new(store_domain: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            store_domain: store_domain.into(),
            api_type: ApiType::StoreApi,
            access_token: access_token.into(),
            context_token: None,
            timeout_ms: None,
        }
    }

    pub fn with_api_type(mut self, api_type: ApiType) -> Self {
        self.api_type = api_type;
        self
    }

    pub fn with_context_token(mut self, token: impl Into<String>) -> Self {
        self.context_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through a variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let store_domain = present(ENV_STORE_DOMAIN).ok_or(ConfigError::Missing(ENV_STORE_DOMAIN))?;
        let access_token = present(ENV_ACCESS_TOKEN).ok_or(ConfigError::Missing(ENV_ACCESS_TOKEN))?;
        let api_type = match present(ENV_API_TYPE) {
            Some(value) => value.parse()?,
            None => ApiType::default(),
        };

        Ok(Self {
            store_domain,
            api_type,
            access_token,
            context_token: present(ENV_CONTEXT_TOKEN),
            timeout_ms: None,
        })
    }

    /// Load config from a TOML or JSON file (by extension).
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: ApiConfig = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path))?;
        Ok(config)
    }

    /// Check that the required values are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_domain.trim().is_empty() {
            return Err(ConfigError::Missing("store_domain"));
        }
        if self.access_token.trim().is_empty() {
            return Err(ConfigError::Missing("access_token"));
        }
        Ok(())
    }

    /// Store domain plus API type path segment, without trailing slash.
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}",
            self.store_domain.trim().trim_end_matches('/'),
            self.api_type.as_str()
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Headers sent with every request.
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        match self.api_type {
            ApiType::StoreApi => {
                headers.push((ACCESS_KEY_HEADER.to_string(), self.access_token.clone()));
                if let Some(token) = &self.context_token {
                    headers.push((CONTEXT_TOKEN_HEADER.to_string(), token.clone()));
                }
            }
            ApiType::AdminApi => {
                headers.push((
                    "Authorization".to_string(),
                    format!("Bearer {}", self.access_token),
                ));
            }
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_defaults_to_store_api() {
        let config = ApiConfig::from_lookup(lookup(&[
            (ENV_STORE_DOMAIN, "https://shop.test/"),
            (ENV_ACCESS_TOKEN, "SWSC123"),
        ]))
        .unwrap();
        assert_eq!(config.api_type, ApiType::StoreApi);
        assert_eq!(config.base_url(), "https://shop.test/store-api");
        assert_eq!(config.context_token, None);
    }

    #[test]
    fn test_from_lookup_missing_values() {
        let err = ApiConfig::from_lookup(lookup(&[(ENV_ACCESS_TOKEN, "SWSC123")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_STORE_DOMAIN));

        let err = ApiConfig::from_lookup(lookup(&[
            (ENV_STORE_DOMAIN, "https://shop.test"),
            (ENV_ACCESS_TOKEN, "  "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(ENV_ACCESS_TOKEN));
    }

    #[test]
    fn test_invalid_api_type() {
        let err = ApiConfig::from_lookup(lookup(&[
            (ENV_STORE_DOMAIN, "https://shop.test"),
            (ENV_ACCESS_TOKEN, "t"),
            (ENV_API_TYPE, "sales-api"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidApiType("sales-api".to_string()));
    }

    #[test]
    fn test_store_api_headers() {
        let config = ApiConfig::new("https://shop.test", "SWSC123").with_context_token("ctx-1");
        let headers = config.auth_headers();
        assert!(headers.contains(&("Accept".to_string(), "application/json".to_string())));
        assert!(headers.contains(&(ACCESS_KEY_HEADER.to_string(), "SWSC123".to_string())));
        assert!(headers.contains(&(CONTEXT_TOKEN_HEADER.to_string(), "ctx-1".to_string())));
    }

    #[test]
    fn test_admin_api_uses_bearer() {
        let config = ApiConfig::new("https://shop.test", "jwt").with_api_type(ApiType::AdminApi);
        assert_eq!(config.base_url(), "https://shop.test/admin-api");
        let headers = config.auth_headers();
        assert!(headers.contains(&("Authorization".to_string(), "Bearer jwt".to_string())));
        assert!(!headers.iter().any(|(k, _)| k == ACCESS_KEY_HEADER));
    }

    #[test]
    fn test_toml_config() {
        let config: ApiConfig = toml::from_str(
            r#"
            store_domain = "https://shop.test"
            access_token = "SWSC123"
            api_type = "store-api"
            timeout_ms = 2500
            "#,
        )
        .unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = ApiConfig::load("/nonexistent/storefront.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
