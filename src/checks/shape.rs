//! Response shape checkers, one per contract.
//!
//! Each checker is a pure function from a [`CompletionResponse`] to a
//! [`ScenarioOutcome`].

use super::arguments::{resolve, ToolExpectation};
use super::outcome::{Failure, PassKind, ScenarioOutcome};
use super::ToolCallMode;
use crate::gateway::{CompletionResponse, ResponseMessage};
use crate::schema::{validate, SchemaContract};
use serde_json::Value;

/// An invariant layered on top of the structural contract.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticCheck {
    /// The value at this JSON pointer exists and is not an empty array, string or object.
    NonEmpty { pointer: String },
}

impl SemanticCheck {
    pub fn non_empty(pointer: impl Into<String>) -> Self {
        SemanticCheck::NonEmpty {
            pointer: pointer.into(),
        }
    }

    pub fn evaluate(&self, value: &Value) -> Result<(), String> {
        match self {
            SemanticCheck::NonEmpty { pointer } => match value.pointer(pointer) {
                None => Err(format!("'{}' is missing", pointer)),
                Some(Value::Array(items)) if items.is_empty() => {
                    Err(format!("'{}' must contain at least one element", pointer))
                }
                Some(Value::String(s)) if s.trim().is_empty() => {
                    Err(format!("'{}' must not be empty", pointer))
                }
                Some(Value::Object(map)) if map.is_empty() => {
                    Err(format!("'{}' must not be empty", pointer))
                }
                Some(Value::Null) => Err(format!("'{}' must not be null", pointer)),
                Some(_) => Ok(()),
            },
        }
    }
}

/// What a structured-JSON answer must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredExpectation {
    pub contract: SchemaContract,
    pub semantic: Vec<SemanticCheck>,
}

fn first_message(response: &CompletionResponse) -> Result<&ResponseMessage, Failure> {
    response
        .first_choice()
        .ok_or(Failure::NoChoices)?
        .message
        .as_ref()
        .ok_or(Failure::MissingMessage)
}

fn message_text(message: &ResponseMessage) -> Result<&str, Failure> {
    let content = message.content.as_deref().ok_or(Failure::MissingContent)?;
    if content.trim().is_empty() {
        return Err(Failure::EmptyContent);
    }
    Ok(content)
}

/// Plain-text contract: the first choice carries non-blank text.
pub fn check_text(response: &CompletionResponse) -> ScenarioOutcome {
    match first_message(response).and_then(message_text) {
        Ok(_) => ScenarioOutcome::Pass(PassKind::TextAnswer),
        Err(failure) => failure.into(),
    }
}

/// Tool-call contract: the first tool call names the expected function with
/// well-formed arguments.
///
/// With no tool call at all, lenient mode falls back to the plain-text check;
/// strict mode fails.
pub fn check_tool_call(
    response: &CompletionResponse,
    expected: &ToolExpectation,
    mode: ToolCallMode,
) -> ScenarioOutcome {
    let message = match first_message(response) {
        Ok(message) => message,
        Err(failure) => return failure.into(),
    };

    let Some(call) = message.tool_calls().first() else {
        return match mode {
            ToolCallMode::Strict => Failure::ToolCallRequired.into(),
            ToolCallMode::Lenient => match message_text(message) {
                Ok(_) => ScenarioOutcome::Pass(PassKind::TextFallback),
                Err(failure) => failure.into(),
            },
        };
    };

    match call.function.name.as_deref() {
        None => return Failure::MissingToolName.into(),
        Some(name) if name != expected.name => {
            return Failure::WrongTool {
                expected: expected.name.clone(),
                actual: name.to_string(),
            }
            .into();
        }
        Some(_) => {}
    }

    match resolve(&call.function.arguments).and_then(|args| expected.check_parameters(&args)) {
        Ok(()) => ScenarioOutcome::Pass(PassKind::ToolCallAccepted),
        Err(e) => Failure::ToolArguments(e).into(),
    }
}

/// Structured-JSON contract: content decodes, satisfies the schema, then the
/// semantic checks.
pub fn check_structured(
    response: &CompletionResponse,
    expected: &StructuredExpectation,
) -> ScenarioOutcome {
    let content = match first_message(response).and_then(message_text) {
        Ok(content) => content,
        Err(failure) => return failure.into(),
    };

    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => return Failure::Decode(e.to_string()).into(),
    };

    if let Err(violation) = validate(&value, &expected.contract) {
        return Failure::Schema(violation).into();
    }

    for check in &expected.semantic {
        if let Err(reason) = check.evaluate(&value) {
            return Failure::Semantic(reason).into();
        }
    }

    ScenarioOutcome::Pass(PassKind::StructuredAccepted)
}
