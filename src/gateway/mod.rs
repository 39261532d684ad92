//! Gateway abstraction: the system under test, seen from the harness.
//!
//! The harness only needs one operation from the gateway: turn a
//! [`CompletionRequest`] into a [`CompletionResponse`] or fail. [`HttpGateway`] does
//! that over HTTP; tests substitute scripted implementations.

use async_trait::async_trait;

pub mod error;
pub mod http;
pub mod types;

pub use error::GatewayError;
pub use http::HttpGateway;
pub use types::{
    ChatMessage, Choice, CompletionRequest, CompletionResponse, FunctionCall, JsonSchemaFormat,
    ResponseFormat, ResponseMessage, Role, Tool, ToolArguments, ToolCall, ToolChoice,
    ToolDeclaration, Usage,
};

/// An OpenAI-compatible chat-completion endpoint.
///
/// Implementations own their timeouts; a timeout surfaces as an ordinary
/// [`GatewayError`]. No implementation retries.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Human-readable location of the gateway, for logs and reports.
    fn endpoint(&self) -> &str;

    /// Issue exactly one chat completion call.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, GatewayError>;

    /// Model identifiers the gateway advertises.
    ///
    /// Default implementation returns `Unsupported`.
    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        Err(GatewayError::Unsupported("list_models"))
    }
}
