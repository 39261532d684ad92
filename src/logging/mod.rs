//! Structured logging helpers
//!
//! Filter construction for the tracing subscriber, request ID generation, and
//! field extraction for gateway call logging.

pub mod fields;
pub mod request_id;

pub use fields::{content_preview, extract_tokens};
pub use request_id::generate_request_id;

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Examples
///
/// ```
/// use conformance::config::logging::{LogFormat, LoggingConfig};
/// use conformance::logging::build_filter_directives;
/// use std::collections::BTreeMap;
///
/// let mut component_levels = BTreeMap::new();
/// component_levels.insert("gateway".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels,
///     enable_content_logging: false,
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,conformance::gateway=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    for (component, level) in &config.component_levels {
        filter_str.push_str(&format!(",conformance::{}={}", component, level));
    }

    filter_str
}
