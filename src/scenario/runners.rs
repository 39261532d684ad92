use super::definitions::{
    PLAIN_SYSTEM_PROMPT, PLAIN_USER_PROMPT, STRUCTURED_SCHEMA_NAME, STRUCTURED_SYSTEM_PROMPT,
    STRUCTURED_USER_PROMPT, TOOL_SYSTEM_PROMPT, TOOL_USER_PROMPT,
};
use super::{Scenario, ScenarioRunner};
use crate::checks::{
    check_structured, check_text, check_tool_call, ScenarioOutcome, SemanticCheck,
    StructuredExpectation, ToolCallMode, ToolExpectation,
};
use crate::gateway::{
    ChatMessage, CompletionRequest, CompletionResponse, JsonSchemaFormat, ResponseFormat,
    ToolChoice, ToolDeclaration,
};
use crate::schema::SchemaContract;

/// Unconstrained text completion.
pub struct PlainChatRunner {
    temperature: f32,
}

impl PlainChatRunner {
    pub fn new(temperature: f32) -> Self {
        Self { temperature }
    }
}

impl ScenarioRunner for PlainChatRunner {
    fn scenario(&self) -> Scenario {
        Scenario::PlainChat
    }

    fn build_request(&self, model: &str) -> CompletionRequest {
        CompletionRequest::new(
            model,
            vec![
                ChatMessage::system(PLAIN_SYSTEM_PROMPT),
                ChatMessage::user(PLAIN_USER_PROMPT),
            ],
        )
        .with_temperature(self.temperature)
    }

    fn check(&self, response: &CompletionResponse) -> ScenarioOutcome {
        check_text(response)
    }
}

/// Function calling with one declared tool.
pub struct ToolCompletionRunner {
    declaration: ToolDeclaration,
    expected: ToolExpectation,
    mode: ToolCallMode,
}

impl ToolCompletionRunner {
    pub fn new(declaration: ToolDeclaration, mode: ToolCallMode) -> Self {
        let expected = ToolExpectation::from_declaration(&declaration);
        Self {
            declaration,
            expected,
            mode,
        }
    }
}

impl ScenarioRunner for ToolCompletionRunner {
    fn scenario(&self) -> Scenario {
        Scenario::ToolCompletion
    }

    fn build_request(&self, model: &str) -> CompletionRequest {
        let choice = match self.mode {
            ToolCallMode::Lenient => ToolChoice::Auto,
            ToolCallMode::Strict => ToolChoice::Required,
        };
        CompletionRequest::new(
            model,
            vec![
                ChatMessage::system(TOOL_SYSTEM_PROMPT),
                ChatMessage::user(TOOL_USER_PROMPT),
            ],
        )
        .with_tool(self.declaration.clone())
        .with_tool_choice(choice)
    }

    fn check(&self, response: &CompletionResponse) -> ScenarioOutcome {
        check_tool_call(response, &self.expected, self.mode)
    }
}

/// Schema-constrained JSON output.
pub struct StructuredJsonRunner {
    expected: StructuredExpectation,
}

impl StructuredJsonRunner {
    /// `non_empty` lists JSON pointers checked after schema validation.
    pub fn new(contract: SchemaContract, non_empty: &[String]) -> Self {
        Self {
            expected: StructuredExpectation {
                contract,
                semantic: non_empty
                    .iter()
                    .map(|pointer| SemanticCheck::non_empty(pointer.as_str()))
                    .collect(),
            },
        }
    }
}

impl ScenarioRunner for StructuredJsonRunner {
    fn scenario(&self) -> Scenario {
        Scenario::StructuredJson
    }

    fn build_request(&self, model: &str) -> CompletionRequest {
        CompletionRequest::new(
            model,
            vec![
                ChatMessage::system(STRUCTURED_SYSTEM_PROMPT),
                ChatMessage::user(STRUCTURED_USER_PROMPT),
            ],
        )
        .with_response_format(ResponseFormat::JsonSchema {
            json_schema: JsonSchemaFormat {
                name: STRUCTURED_SCHEMA_NAME.to_string(),
                description: None,
                schema: self.expected.contract.clone(),
                strict: Some(true),
            },
        })
    }

    fn check(&self, response: &CompletionResponse) -> ScenarioOutcome {
        check_structured(response, &self.expected)
    }
}
