//! Gateway connection configuration

use serde::{Deserialize, Serialize};

/// Where the gateway under test lives and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Gateway root, e.g. `http://localhost:8000`. A trailing `/v1` is tolerated.
    pub base_url: String,
    /// Environment variable holding a bearer token, if the gateway wants one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Per-call timeout enforced by the HTTP client.
    pub timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key_env: None,
            timeout_seconds: 90,
        }
    }
}

impl GatewayConfig {
    /// Base URL with any trailing `/` and `/v1` removed.
    pub fn normalized_base_url(&self) -> String {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        trimmed
            .strip_suffix("/v1")
            .unwrap_or(trimmed)
            .to_string()
    }

    /// Resolve the API key from the configured environment variable.
    ///
    /// Returns `Ok(None)` when no variable is configured.
    pub fn resolve_api_key(&self) -> Result<Option<String>, super::ConfigError> {
        match &self.api_key_env {
            None => Ok(None),
            Some(var) => std::env::var(var).map(Some).map_err(|_| {
                super::ConfigError::MissingField(format!(
                    "environment variable {} (gateway.api_key_env)",
                    var
                ))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_config_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_seconds, 90);
        assert!(config.api_key_env.is_none());
    }

    #[test]
    fn test_normalized_base_url_strips_v1_and_slash() {
        let mut config = GatewayConfig::default();
        config.base_url = "http://localhost:8000/v1/".to_string();
        assert_eq!(config.normalized_base_url(), "http://localhost:8000");

        config.base_url = "http://balancer.internal".to_string();
        assert_eq!(config.normalized_base_url(), "http://balancer.internal");
    }

    #[test]
    fn test_resolve_api_key_unset_variable() {
        let config = GatewayConfig {
            api_key_env: Some("CONFORMANCE_TEST_KEY_THAT_IS_NOT_SET".to_string()),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_err());
    }

    #[test]
    fn test_resolve_api_key_none_configured() {
        assert_eq!(GatewayConfig::default().resolve_api_key().unwrap(), None);
    }
}
