//! CLI module for the conformance harness
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `run` - Run the conformance suite against the gateway
//! - `models` - List the models the gateway advertises
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Run with conformance.toml (or defaults)
//! conformance run
//!
//! # Two models, five rounds each, tool calls required
//! conformance run -m gemini-2.5-pro -m gpt-4o -n 5 --strict
//!
//! # Generate shell completions
//! conformance completions bash > ~/.bash_completion.d/conformance
//! ```

pub mod completions;
pub mod config;
pub mod models;
pub mod output;
pub mod run;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "conformance.toml";

/// Conformance harness for OpenAI-compatible model balancers
#[derive(Parser, Debug)]
#[command(
    name = "conformance",
    version,
    about = "Conformance test harness for OpenAI-compatible chat-completion gateways"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the conformance suite
    Run(RunArgs),
    /// List models advertised by the gateway
    Models(ModelsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to configuration file [default: conformance.toml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override gateway base URL
    #[arg(short = 'u', long)]
    pub base_url: Option<String>,

    /// Model to test (repeatable; replaces the configured list)
    #[arg(short, long = "model")]
    pub models: Vec<String>,

    /// Override iteration count per model
    #[arg(short = 'n', long)]
    pub iterations: Option<u32>,

    /// Require a tool call in the tool scenario
    #[arg(long)]
    pub strict: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CONFORMANCE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Output the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Override gateway base URL
    #[arg(short = 'u', long)]
    pub base_url: Option<String>,

    /// Path to configuration file [default: conformance.toml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
