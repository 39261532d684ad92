//! Logging section: where the harness's own diagnostics go and how loud they are
//!
//! The conformance report always goes to stdout. Everything configured here
//! only affects the tracing output on stderr.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Modules that accept a per-component level under `[logging.component_levels]`.
pub const LOG_COMPONENTS: &[&str] = &["checks", "cli", "gateway", "scenario", "schema", "suite"];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines, one per scenario event
    #[default]
    Pretty,
    /// One JSON object per event, carrying the scenario span fields
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
    /// Level overrides for harness modules, e.g. `gateway = "debug"` to see
    /// token counts of every completion.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub component_levels: BTreeMap<String, String>,
    /// Attach the first 100 characters of each answer to the scenario span.
    pub enable_content_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: BTreeMap::new(),
            enable_content_logging: false,
        }
    }
}

impl LoggingConfig {
    /// Reject unknown component names and levels tracing would silently ignore.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (component, level) in &self.component_levels {
            let field = format!("logging.component_levels.{}", component);
            if !LOG_COMPONENTS.contains(&component.as_str()) {
                return Err(ConfigError::validation(
                    field,
                    format!("unknown component; expected one of {}", LOG_COMPONENTS.join(", ")),
                ));
            }
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::validation(
                    field,
                    format!("'{}' is not a log level", level),
                ));
            }
        }
        Ok(())
    }
}
