// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provider configuration

use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, ApiResult};

/// Default Pingdom API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.pingdom.com/api/3.1";

/// Connection settings for the Pingdom API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token
    pub api_token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Configuration with the given token and default endpoint
    pub fn with_token(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Default::default()
        }
    }

    /// Load configuration from the environment
    ///
    /// - `PINGDOM_API_TOKEN` (required)
    /// - `PINGDOM_BASE_URL` (default [`DEFAULT_BASE_URL`])
    /// - `PINGDOM_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup("PINGDOM_API_TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Configuration("PINGDOM_API_TOKEN not set".to_string()))?;

        let base_url = lookup("PINGDOM_BASE_URL").unwrap_or_else(default_base_url);

        let timeout_secs = match lookup("PINGDOM_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                ApiError::Configuration(format!("PINGDOM_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => default_timeout(),
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            timeout_secs,
        })
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
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_token_is_required() {
        let err = ProviderConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));

        let err = ProviderConfig::from_lookup(lookup(&[("PINGDOM_API_TOKEN", "")])).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("PINGDOM_API_TOKEN", "secret"),
            ("PINGDOM_BASE_URL", "http://localhost:8080/api/3.1/"),
            ("PINGDOM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.api_token, "secret");
        assert_eq!(config.base_url, "http://localhost:8080/api/3.1");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ProviderConfig = serde_json::from_str(r#"{"api_token": "t"}"#).unwrap();
        assert_eq!(config, ProviderConfig::with_token("t"));
    }
}
