//! Built-in prompts, tool declaration and structured-output contract.

use crate::gateway::ToolDeclaration;
use crate::schema::{JsonType, SchemaContract};
use std::collections::BTreeMap;

pub const PLAIN_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const PLAIN_USER_PROMPT: &str = "What is the capital of France?";

pub const TOOL_SYSTEM_PROMPT: &str = "You are a helpful assistant that can calculate. \
     You must use the calculate tool to evaluate any arithmetic instead of answering directly.";
pub const TOOL_USER_PROMPT: &str = "What is 23 plus 45?";
pub const TOOL_NAME: &str = "calculate";

pub const STRUCTURED_SYSTEM_PROMPT: &str =
    "You are a helpful math tutor. Guide the user through the solution step by step.";
pub const STRUCTURED_USER_PROMPT: &str = "How can I solve 8x + 7 = -23?";
pub const STRUCTURED_SCHEMA_NAME: &str = "math_reasoning";

fn described(schema_type: JsonType, description: &str) -> SchemaContract {
    SchemaContract {
        description: Some(description.to_string()),
        ..SchemaContract::of_type(schema_type)
    }
}

fn closed_object(properties: Vec<(&str, SchemaContract)>, required: &[&str]) -> SchemaContract {
    SchemaContract {
        properties: properties
            .into_iter()
            .map(|(name, schema)| (name.to_string(), schema))
            .collect::<BTreeMap<_, _>>(),
        required: required.iter().map(|s| s.to_string()).collect(),
        additional_properties: Some(false),
        ..SchemaContract::of_type(JsonType::Object)
    }
}

/// The `calculate` function offered in the tool scenario.
pub fn calculate_tool() -> ToolDeclaration {
    let mut parameters = SchemaContract::of_type(JsonType::Object);
    parameters.properties.insert(
        "expression".to_string(),
        described(
            JsonType::String,
            "The mathematical expression to calculate",
        ),
    );
    parameters.required.push("expression".to_string());

    ToolDeclaration {
        name: TOOL_NAME.to_string(),
        description: "Calculate a mathematical expression".to_string(),
        parameters,
    }
}

/// `math_reasoning`: a list of explained steps plus a final answer, no extra keys.
pub fn math_reasoning_contract() -> SchemaContract {
    let step = closed_object(
        vec![
            ("explanation", SchemaContract::of_type(JsonType::String)),
            ("output", SchemaContract::of_type(JsonType::String)),
        ],
        &["explanation", "output"],
    );
    let steps = SchemaContract {
        items: Some(Box::new(step)),
        ..SchemaContract::of_type(JsonType::Array)
    };

    closed_object(
        vec![
            ("steps", steps),
            ("final_answer", SchemaContract::of_type(JsonType::String)),
        ],
        &["steps", "final_answer"],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_definitions_are_consistent() {
        assert!(calculate_tool().parameters.check_definition().is_ok());
        assert!(math_reasoning_contract().check_definition().is_ok());
    }

    #[test]
    fn test_math_reasoning_wire_form() {
        let expected = json!({
            "type": "object",
            "properties": {
                "steps": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "explanation": {"type": "string"},
                            "output": {"type": "string"}
                        },
                        "required": ["explanation", "output"],
                        "additionalProperties": false
                    }
                },
                "final_answer": {"type": "string"}
            },
            "required": ["steps", "final_answer"],
            "additionalProperties": false
        });
        assert_eq!(math_reasoning_contract().to_value(), expected);
    }

    #[test]
    fn test_calculate_tool_wire_form() {
        let tool = calculate_tool();
        assert_eq!(tool.name, "calculate");
        assert_eq!(
            tool.parameters.to_value(),
            json!({
                "type": "object",
                "properties": {
                    "expression": {
                        "type": "string",
                        "description": "The mathematical expression to calculate"
                    }
                },
                "required": ["expression"]
            })
        );
    }
}
