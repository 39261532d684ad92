//! Suite configuration: which models, how many rounds, how strict

use crate::checks::ToolCallMode;
use serde::{Deserialize, Serialize};

/// Suite-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Model identifiers to test, in order.
    pub models: Vec<String>,
    /// Rounds of all three scenarios per model.
    pub iterations: u32,
    /// Whether a plain-text answer is acceptable for the tool scenario.
    pub tool_call_mode: ToolCallMode,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            models: vec!["gemini-2.5-pro".to_string()],
            iterations: 3,
            tool_call_mode: ToolCallMode::Lenient,
        }
    }
}

/// Split a comma separated model list, dropping blanks.
pub fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect()
}
