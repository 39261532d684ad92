//! Request and response types for the OpenAI-compatible chat-completion API.

use crate::schema::SchemaContract;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A function offered to the model for tool calling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: SchemaContract,
}

/// Wire wrapper: `{"type": "function", "function": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ToolDeclaration,
}

impl Tool {
    pub fn function(declaration: ToolDeclaration) -> Self {
        Self {
            kind: "function".to_string(),
            function: declaration,
        }
    }
}

/// How strongly the model is pushed towards calling a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    Auto,
    Required,
    None,
}

/// Output format directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    JsonObject,
    JsonSchema { json_schema: JsonSchemaFormat },
}

/// Named schema for `response_format: json_schema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: SchemaContract,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Chat completion request. Built fresh for every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: None,
            tool_choice: None,
            response_format: None,
            temperature: None,
            max_tokens: None,
            top_p: None,
        }
    }

    pub fn with_tool(mut self, declaration: ToolDeclaration) -> Self {
        self.tools
            .get_or_insert_with(Vec::new)
            .push(Tool::function(declaration));
        self
    }

    pub fn with_tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Chat completion response (non-streaming).
///
/// Everything except `choices` is informational; a missing `choices` array decodes
/// as empty so that "no choices" is reported as a shape violation, not a decode error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Single-choice response wrapping `message`.
    pub fn from_message(message: ResponseMessage) -> Self {
        Self {
            object: Some("chat.completion".to_string()),
            choices: vec![Choice {
                index: 0,
                message: Some(message),
                finish_reason: Some("stop".to_string()),
            }],
            ..Default::default()
        }
    }

    pub fn first_choice(&self) -> Option<&Choice> {
        self.choices.first()
    }
}

/// A single choice in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<ResponseMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Assistant message. `content: None` (absent or null) is distinct from `Some("")`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ResponseMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            role: Some("assistant".to_string()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn tool_call(name: impl Into<String>, arguments: ToolArguments) -> Self {
        Self {
            role: Some("assistant".to_string()),
            content: None,
            refusal: None,
            tool_calls: Some(vec![ToolCall {
                id: Some("call_0".to_string()),
                kind: Some("function".to_string()),
                function: FunctionCall {
                    name: Some(name.into()),
                    arguments,
                },
            }]),
        }
    }

    /// Tool calls, treating an absent list like an empty one.
    pub fn tool_calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or(&[])
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub function: FunctionCall,
}

/// Function name plus its arguments payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: ToolArguments,
}

/// Tool-call arguments as they arrive on the wire.
///
/// OpenAI specifies JSON text, but gateways fronting other providers have been
/// seen returning an already-decoded object for the same field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolArguments {
    /// Already-decoded key/value mapping.
    Decoded(Map<String, Value>),
    /// JSON text that still needs parsing.
    Encoded(String),
    /// Anything else (numbers, arrays, null, missing).
    Other(Value),
}

impl Default for ToolArguments {
    fn default() -> Self {
        ToolArguments::Other(Value::Null)
    }
}

/// Token usage statistics. Counters are informational; gateways send `null`
/// for the ones they do not track.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

/// OpenAI error envelope: `{"error": {"message": ..}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<Value>,
}

/// `/v1/models` listing. OpenAI wraps entries in `data`; some balancers return a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ModelList {
    Wrapped { data: Vec<ModelEntry> },
    Bare(Vec<ModelEntry>),
}

impl ModelList {
    pub fn into_ids(self) -> Vec<String> {
        let entries = match self {
            ModelList::Wrapped { data } => data,
            ModelList::Bare(entries) => entries,
        };
        entries.into_iter().map(|m| m.id).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::JsonType;
    use serde_json::json;

    fn calculate_tool() -> ToolDeclaration {
        ToolDeclaration {
            name: "calculate".to_string(),
            description: "Calculate a mathematical expression".to_string(),
            parameters: SchemaContract::from_value(json!({
                "type": "object",
                "properties": {"expression": {"type": "string"}},
                "required": ["expression"]
            }))
            .unwrap(),
        }
    }

    #[test]
    fn test_request_serialize_minimal() {
        let request = CompletionRequest::new("m1", vec![ChatMessage::user("Hi")]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "m1");
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("tools").is_none());
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_request_serialize_tool() {
        let request = CompletionRequest::new("m1", vec![])
            .with_tool(calculate_tool())
            .with_tool_choice(ToolChoice::Auto);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["tools"][0]["type"], "function");
        assert_eq!(json["tools"][0]["function"]["name"], "calculate");
        assert_eq!(
            json["tools"][0]["function"]["parameters"]["required"][0],
            "expression"
        );
        assert_eq!(json["tool_choice"], "auto");
    }

    #[test]
    fn test_request_serialize_json_schema_format() {
        let request = CompletionRequest::new("m1", vec![]).with_response_format(
            ResponseFormat::JsonSchema {
                json_schema: JsonSchemaFormat {
                    name: "answer".to_string(),
                    description: None,
                    schema: SchemaContract::of_type(JsonType::Object),
                    strict: Some(true),
                },
            },
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_schema");
        assert_eq!(json["response_format"]["json_schema"]["name"], "answer");
        assert_eq!(json["response_format"]["json_schema"]["strict"], true);
        assert_eq!(
            json["response_format"]["json_schema"]["schema"]["type"],
            "object"
        );
    }

    #[test]
    fn test_response_deserialize_text() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1234567890,
            "model": "gpt-4",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Paris"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 1, "total_tokens": 11}
        }))
        .unwrap();
        let message = response.first_choice().unwrap().message.as_ref().unwrap();
        assert_eq!(message.content.as_deref(), Some("Paris"));
        assert!(message.tool_calls().is_empty());
        assert_eq!(response.usage.unwrap().total_tokens, Some(11));
    }

    #[test]
    fn test_response_null_usage_counters_still_decode() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "Paris"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": null, "total_tokens": null}
        }))
        .unwrap();
        let usage = response.usage.as_ref().unwrap();
        assert_eq!(usage.prompt_tokens, Some(10));
        assert_eq!(usage.completion_tokens, None);
        assert_eq!(
            response.first_choice().unwrap().message.as_ref().unwrap().content.as_deref(),
            Some("Paris")
        );
    }

    #[test]
    fn test_tool_call_without_name_decodes() {
        let call: ToolCall = serde_json::from_value(json!({
            "id": "call_1",
            "type": "function",
            "function": {"arguments": "{\"expression\": \"1+1\"}"}
        }))
        .unwrap();
        assert_eq!(call.function.name, None);
        assert!(matches!(call.function.arguments, ToolArguments::Encoded(_)));
    }

    #[test]
    fn test_response_missing_choices_is_empty() {
        let response: CompletionResponse = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert!(response.choices.is_empty());
    }

    #[test]
    fn test_response_null_content_is_none() {
        let message: ResponseMessage =
            serde_json::from_value(json!({"role": "assistant", "content": null})).unwrap();
        assert_eq!(message.content, None);

        let message: ResponseMessage =
            serde_json::from_value(json!({"role": "assistant", "content": ""})).unwrap();
        assert_eq!(message.content.as_deref(), Some(""));
    }

    #[test]
    fn test_tool_arguments_decode_each_encoding() {
        let call: FunctionCall =
            serde_json::from_value(json!({"name": "calculate", "arguments": {"expression": "1+1"}}))
                .unwrap();
        assert!(matches!(call.arguments, ToolArguments::Decoded(_)));

        let call: FunctionCall = serde_json::from_value(
            json!({"name": "calculate", "arguments": "{\"expression\": \"1+1\"}"}),
        )
        .unwrap();
        assert!(matches!(call.arguments, ToolArguments::Encoded(_)));

        let call: FunctionCall =
            serde_json::from_value(json!({"name": "calculate", "arguments": 7})).unwrap();
        assert_eq!(call.arguments, ToolArguments::Other(json!(7)));

        let call: FunctionCall = serde_json::from_value(json!({"name": "calculate"})).unwrap();
        assert_eq!(call.arguments, ToolArguments::Other(Value::Null));
    }

    #[test]
    fn test_model_list_both_shapes() {
        let wrapped: ModelList =
            serde_json::from_value(json!({"object": "list", "data": [{"id": "a"}, {"id": "b"}]}))
                .unwrap();
        assert_eq!(wrapped.into_ids(), vec!["a", "b"]);

        let bare: ModelList =
            serde_json::from_value(json!([{"id": "balancer", "object": "model"}])).unwrap();
        assert_eq!(bare.into_ids(), vec!["balancer"]);
    }
}
