//! Shared test utilities for conformance integration tests.
//!
//! Provides response builders, a scripted in-memory gateway and wire-format
//! bodies for HTTP mocks.

#![allow(dead_code)]

use async_trait::async_trait;
use conformance::gateway::{
    CompletionRequest, CompletionResponse, Gateway, GatewayError, ResponseMessage, ToolArguments,
};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

// =============================================================================
// Response Builders
// =============================================================================

/// Single-choice text answer.
pub fn text_response(content: &str) -> CompletionResponse {
    CompletionResponse::from_message(ResponseMessage::text(content))
}

/// Single tool call with already-decoded arguments.
pub fn decoded_tool_response(name: &str, arguments: Value) -> CompletionResponse {
    let map: Map<String, Value> = match arguments {
        Value::Object(map) => map,
        other => panic!("Expected object arguments, got {}", other),
    };
    CompletionResponse::from_message(ResponseMessage::tool_call(
        name,
        ToolArguments::Decoded(map),
    ))
}

/// Single tool call with JSON-text arguments.
pub fn encoded_tool_response(name: &str, arguments: &str) -> CompletionResponse {
    CompletionResponse::from_message(ResponseMessage::tool_call(
        name,
        ToolArguments::Encoded(arguments.to_string()),
    ))
}

/// A valid `math_reasoning` answer.
pub fn math_answer() -> String {
    json!({
        "steps": [
            {"explanation": "Subtract 7 from both sides", "output": "8x = -30"},
            {"explanation": "Divide both sides by 8", "output": "x = -3.75"}
        ],
        "final_answer": "x = -3.75"
    })
    .to_string()
}

/// Responses that pass plain chat, tool completion and structured JSON, in order.
pub fn passing_round() -> Vec<Result<CompletionResponse, GatewayError>> {
    vec![
        Ok(text_response("The capital of France is Paris.")),
        Ok(decoded_tool_response(
            "calculate",
            json!({"expression": "23+45"}),
        )),
        Ok(text_response(&math_answer())),
    ]
}

// =============================================================================
// Scripted Gateway
// =============================================================================

/// In-memory gateway replaying a fixed script of results per model.
///
/// Records every request it receives. An exhausted script answers with a
/// network error.
#[derive(Default)]
pub struct ScriptedGateway {
    scripts: Mutex<HashMap<String, VecDeque<Result<CompletionResponse, GatewayError>>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, model: &str, results: Vec<Result<CompletionResponse, GatewayError>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(model.to_string(), results.into());
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    fn endpoint(&self) -> &str {
        "scripted://gateway"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&request.model)
            .and_then(|queue| queue.pop_front());
        self.requests.lock().unwrap().push(request);
        next.unwrap_or_else(|| Err(GatewayError::Network("script exhausted".to_string())))
    }
}

// =============================================================================
// Wire Bodies
// =============================================================================

/// OpenAI chat completion envelope around one assistant message.
pub fn completion_body(message: Value) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gemini-2.5-pro",
        "choices": [{
            "index": 0,
            "message": message,
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
    })
}

pub fn text_body(content: &str) -> Value {
    completion_body(json!({"role": "assistant", "content": content}))
}

/// Tool call whose `arguments` is whatever JSON value is given.
pub fn tool_call_body(name: &str, arguments: Value) -> Value {
    completion_body(json!({
        "role": "assistant",
        "content": null,
        "tool_calls": [{
            "id": "call_1",
            "type": "function",
            "function": {"name": name, "arguments": arguments}
        }]
    }))
}
