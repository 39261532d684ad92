//! Configuration module for the conformance harness
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`CONFORMANCE_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use conformance::config::ConformanceConfig;
//!
//! let config = ConformanceConfig::default();
//! assert_eq!(config.suite.iterations, 3);
//!
//! let toml = r#"
//! [suite]
//! models = ["m1", "m2"]
//! iterations = 5
//! "#;
//! let config: ConformanceConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.suite.models.len(), 2);
//! ```

pub mod error;
pub mod gateway;
pub mod logging;
pub mod scenarios;
pub mod suite;

pub use error::ConfigError;
pub use gateway::GatewayConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use scenarios::ScenarioConfig;
pub use suite::{parse_model_list, SuiteConfig};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Unified configuration for a conformance run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConformanceConfig {
    /// Gateway under test
    pub gateway: GatewayConfig,
    /// Models, iterations and strictness
    pub suite: SuiteConfig,
    /// Scenario tuning
    pub scenarios: ScenarioConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl ConformanceConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("CONFORMANCE_BASE_URL") {
            self.gateway.base_url = url;
        }
        if let Ok(models) = std::env::var("CONFORMANCE_MODELS") {
            let models = parse_model_list(&models);
            if !models.is_empty() {
                self.suite.models = models;
            }
        }
        if let Ok(iterations) = std::env::var("CONFORMANCE_ITERATIONS") {
            if let Ok(n) = iterations.parse() {
                self.suite.iterations = n;
            }
        }
        if let Ok(mode) = std::env::var("CONFORMANCE_TOOL_MODE") {
            if let Ok(m) = mode.parse() {
                self.suite.tool_call_mode = m;
            }
        }

        if let Ok(level) = std::env::var("CONFORMANCE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CONFORMANCE_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    ///
    /// Any error here is fatal: no scenario runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suite.models.is_empty() {
            return Err(ConfigError::validation(
                "suite.models",
                "at least one model identifier is required",
            ));
        }
        let mut seen = HashSet::new();
        for (i, model) in self.suite.models.iter().enumerate() {
            if model.trim().is_empty() {
                return Err(ConfigError::validation(
                    format!("suite.models[{}]", i),
                    "model identifier cannot be blank",
                ));
            }
            if !seen.insert(model.as_str()) {
                return Err(ConfigError::validation(
                    format!("suite.models[{}]", i),
                    format!("duplicate model identifier '{}'", model),
                ));
            }
        }
        if self.suite.iterations == 0 {
            return Err(ConfigError::validation(
                "suite.iterations",
                "iterations must be at least 1",
            ));
        }

        let base_url = self.gateway.normalized_base_url();
        if base_url.is_empty() {
            return Err(ConfigError::validation(
                "gateway.base_url",
                "URL cannot be empty",
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::validation(
                "gateway.base_url",
                format!("'{}' is not an http(s) URL", base_url),
            ));
        }
        if self.gateway.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "gateway.timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        self.gateway.resolve_api_key()?;

        for (i, pointer) in self.scenarios.non_empty.iter().enumerate() {
            if !pointer.is_empty() && !pointer.starts_with('/') {
                return Err(ConfigError::validation(
                    format!("scenarios.non_empty[{}]", i),
                    format!("'{}' is not a JSON pointer", pointer),
                ));
            }
        }
        self.scenarios.load_structured_contract()?;
        self.logging.validate()?;

        Ok(())
    }
}
