//! Run command implementation

use crate::checks::ToolCallMode;
use crate::cli::output::{format_summary, format_summary_json};
use crate::cli::{RunArgs, DEFAULT_CONFIG_PATH};
use crate::config::{ConfigError, ConformanceConfig, LogFormat};
use crate::gateway::HttpGateway;
use crate::suite::{FatalError, MultiModelDriver, RunSummary, SuiteOrchestrator};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load the configuration file, falling back to defaults when the default path is absent.
///
/// An explicitly given path must exist.
pub fn load_config_file(path: Option<&Path>) -> Result<ConformanceConfig, ConfigError> {
    match path {
        Some(p) => ConformanceConfig::load(Some(p)),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                ConformanceConfig::load(Some(default_path))
            } else {
                tracing::debug!("Config file not found, using defaults");
                Ok(ConformanceConfig::default())
            }
        }
    }
}

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(args: &RunArgs) -> Result<ConformanceConfig, ConfigError> {
    let mut config = load_config_file(args.config.as_deref())?.with_env_overrides();

    // CLI overrides (highest priority)
    if let Some(ref base_url) = args.base_url {
        config.gateway.base_url = base_url.clone();
    }
    if !args.models.is_empty() {
        config.suite.models = args.models.clone();
    }
    if let Some(iterations) = args.iterations {
        config.suite.iterations = iterations;
    }
    if args.strict {
        config.suite.tool_call_mode = ToolCallMode::Strict;
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Initialize tracing based on configuration
///
/// Logs go to stderr; stdout carries only the report.
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    if config.enable_content_logging {
        eprintln!("WARNING: Content logging is enabled. Model response content will be logged.");
        eprintln!("         This may include sensitive data. Use only for debugging.");
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Validate configuration and run every configured model.
pub async fn run_suite(config: &ConformanceConfig) -> Result<RunSummary, FatalError> {
    config.validate()?;
    let gateway = Arc::new(HttpGateway::from_config(&config.gateway)?);
    let orchestrator = SuiteOrchestrator::from_config(gateway, config)?;
    MultiModelDriver::new(orchestrator)
        .run(&config.suite.models)
        .await
}

/// Handle `conformance run`
///
/// Returns whether every model passed every test. Any error is fatal: no
/// report was produced.
pub async fn handle_run(args: &RunArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(args)?;
    init_tracing(&config.logging)?;

    let summary = run_suite(&config).await?;

    let output = if args.json {
        format_summary_json(&summary)?
    } else {
        format_summary(&summary)
    };
    println!("{}", output);

    Ok(summary.overall_success())
}
