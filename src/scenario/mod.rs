//! Scenario runners: one request, one response, one outcome.
//!
//! Each [`ScenarioRunner`] builds a fresh [`CompletionRequest`] for its contract,
//! calls the gateway exactly once and hands the response to the matching
//! checker. Runners never retry; a transport error is one failed outcome.

pub mod definitions;
pub mod runners;

pub use runners::{PlainChatRunner, StructuredJsonRunner, ToolCompletionRunner};

use crate::checks::{Failure, ScenarioOutcome};
use crate::config::{ConfigError, ConformanceConfig};
use crate::gateway::{CompletionRequest, CompletionResponse, Gateway};
use crate::logging::content_preview;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three contracts under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    PlainChat,
    ToolCompletion,
    StructuredJson,
}

impl Scenario {
    /// Execution order within one iteration.
    pub const ALL: [Scenario; 3] = [
        Scenario::PlainChat,
        Scenario::ToolCompletion,
        Scenario::StructuredJson,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::PlainChat => "plain_chat",
            Scenario::ToolCompletion => "tool_completion",
            Scenario::StructuredJson => "structured_json",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One conformance scenario.
#[async_trait]
pub trait ScenarioRunner: Send + Sync {
    fn scenario(&self) -> Scenario;

    /// Request for `model`. Built fresh on every call.
    fn build_request(&self, model: &str) -> CompletionRequest;

    /// Judge a response against this scenario's contract.
    fn check(&self, response: &CompletionResponse) -> ScenarioOutcome;

    /// Issue the request once and check the response.
    async fn run(&self, gateway: &dyn Gateway, model: &str, log_content: bool) -> ScenarioOutcome {
        let request = self.build_request(model);
        match gateway.complete(request).await {
            Ok(response) => {
                if let Some(preview) = content_preview(&response, log_content) {
                    tracing::debug!(content_preview = %preview, "Response content");
                }
                self.check(&response)
            }
            Err(e) => Failure::Transport(e).into(),
        }
    }
}

/// The runners for one suite, in execution order.
pub struct ScenarioSet {
    runners: Vec<Box<dyn ScenarioRunner>>,
}

impl ScenarioSet {
    /// Build the three runners from configuration.
    ///
    /// Contract definitions are checked here, so a malformed one aborts the run
    /// before any request is sent.
    pub fn from_config(config: &ConformanceConfig) -> Result<Self, ConfigError> {
        let tool = definitions::calculate_tool();
        tool.parameters
            .check_definition()
            .map_err(|source| ConfigError::Contract {
                name: tool.name.clone(),
                source,
            })?;

        let contract = match config.scenarios.load_structured_contract()? {
            Some(contract) => contract,
            None => {
                let contract = definitions::math_reasoning_contract();
                contract
                    .check_definition()
                    .map_err(|source| ConfigError::Contract {
                        name: definitions::STRUCTURED_SCHEMA_NAME.to_string(),
                        source,
                    })?;
                contract
            }
        };

        Ok(Self {
            runners: vec![
                Box::new(PlainChatRunner::new(config.scenarios.temperature)),
                Box::new(ToolCompletionRunner::new(tool, config.suite.tool_call_mode)),
                Box::new(StructuredJsonRunner::new(
                    contract,
                    &config.scenarios.non_empty,
                )),
            ],
        })
    }

    /// Custom runner list, mainly for tests.
    pub fn from_runners(runners: Vec<Box<dyn ScenarioRunner>>) -> Self {
        Self { runners }
    }

    pub fn runners(&self) -> &[Box<dyn ScenarioRunner>] {
        &self.runners
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }
}
