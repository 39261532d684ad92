//! Response checks: does a gateway response satisfy a scenario's contract?
//!
//! Everything in this module is pure. Checkers never panic and never touch the
//! network; they turn a [`CompletionResponse`](crate::gateway::CompletionResponse)
//! into a [`ScenarioOutcome`].

pub mod arguments;
pub mod outcome;
pub mod shape;

pub use arguments::{resolve, ArgumentError, RequiredParameter, ToolExpectation};
pub use outcome::{Failure, FailureCategory, PassKind, ScenarioOutcome};
pub use shape::{check_structured, check_text, check_tool_call, SemanticCheck, StructuredExpectation};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the tool scenario treats a response without a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCallMode {
    /// A direct text answer is accepted.
    #[default]
    Lenient,
    /// A tool call is required; the request sets `tool_choice: required`.
    Strict,
}

impl FromStr for ToolCallMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(ToolCallMode::Lenient),
            "strict" => Ok(ToolCallMode::Strict),
            _ => Err(format!("Unknown tool call mode: {}", s)),
        }
    }
}

impl fmt::Display for ToolCallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToolCallMode::Lenient => "lenient",
            ToolCallMode::Strict => "strict",
        })
    }
}
