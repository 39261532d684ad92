use crate::config::ConfigError;
use thiserror::Error;

/// Aborts a run before any scenario executes. Never produced by a scenario.
#[derive(Error, Debug)]
pub enum FatalError {
    #[error("no models to test")]
    NoModels,

    #[error("invalid model identifier at position {index}: {reason}")]
    InvalidModel { index: usize, reason: String },

    #[error("model identifier cannot be blank")]
    BlankModel,

    #[error("iteration count must be at least 1")]
    NoIterations,

    #[error("no scenarios to run")]
    NoScenarios,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
