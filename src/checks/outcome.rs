//! Scenario outcomes and failure reasons.

use super::arguments::ArgumentError;
use crate::gateway::GatewayError;
use crate::schema::Violation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a passing scenario passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    TextAnswer,
    ToolCallAccepted,
    /// Lenient tool scenario: the model answered directly instead of calling the tool.
    TextFallback,
    StructuredAccepted,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PassKind::TextAnswer => "text response accepted",
            PassKind::ToolCallAccepted => "tool call accepted",
            PassKind::TextFallback => "text answer accepted in place of tool call",
            PassKind::StructuredAccepted => "structured output accepted",
        })
    }
}

/// The error taxonomy every scenario failure falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    Transport,
    Shape,
    Decode,
    Schema,
    ToolArguments,
    Semantic,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailureCategory::Transport => "transport",
            FailureCategory::Shape => "shape",
            FailureCategory::Decode => "decode",
            FailureCategory::Schema => "schema",
            FailureCategory::ToolArguments => "tool_arguments",
            FailureCategory::Semantic => "semantic",
        })
    }
}

/// A scenario failure with its human-readable reason.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Failure {
    #[error("gateway call failed: {0}")]
    Transport(#[from] GatewayError),

    #[error("no choices in response")]
    NoChoices,

    #[error("first choice has no message")]
    MissingMessage,

    #[error("message has no content")]
    MissingContent,

    #[error("message content is empty")]
    EmptyContent,

    #[error("model answered in text but a tool call is required")]
    ToolCallRequired,

    #[error("content is not valid JSON: {0}")]
    Decode(String),

    #[error("schema violation at {0}")]
    Schema(Violation),

    #[error("unexpected tool '{actual}', expected '{expected}'")]
    WrongTool { expected: String, actual: String },

    #[error("tool call has no function name")]
    MissingToolName,

    #[error("tool arguments rejected: {0}")]
    ToolArguments(#[from] ArgumentError),

    #[error("semantic check failed: {0}")]
    Semantic(String),
}

impl Failure {
    pub fn category(&self) -> FailureCategory {
        match self {
            Failure::Transport(_) => FailureCategory::Transport,
            Failure::NoChoices
            | Failure::MissingMessage
            | Failure::MissingContent
            | Failure::EmptyContent
            | Failure::ToolCallRequired => FailureCategory::Shape,
            Failure::Decode(_) => FailureCategory::Decode,
            Failure::Schema(_) => FailureCategory::Schema,
            Failure::WrongTool { .. } | Failure::MissingToolName | Failure::ToolArguments(_) => {
                FailureCategory::ToolArguments
            }
            Failure::Semantic(_) => FailureCategory::Semantic,
        }
    }
}

/// Verdict for one scenario invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioOutcome {
    Pass(PassKind),
    Fail(Failure),
}

impl ScenarioOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, ScenarioOutcome::Pass(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ScenarioOutcome::Pass(_) => None,
            ScenarioOutcome::Fail(failure) => Some(failure),
        }
    }

    /// One-line description: the pass note or the failure reason.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioOutcome::Pass(kind) => kind.fmt(f),
            ScenarioOutcome::Fail(failure) => failure.fmt(f),
        }
    }
}

impl From<Failure> for ScenarioOutcome {
    fn from(failure: Failure) -> Self {
        ScenarioOutcome::Fail(failure)
    }
}
