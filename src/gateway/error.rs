//! Error types for gateway calls.

use super::types::ErrorEnvelope;
use thiserror::Error;

/// Errors that can occur while talking to the gateway under test.
///
/// Every variant is a transport/protocol failure from the harness' point of view:
/// it fails the scenario that issued the call and nothing else.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Gateway returned an error response (4xx, 5xx).
    #[error("Gateway error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response body is not a chat-completion envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Operation not offered by this gateway implementation.
    #[error("Method '{0}' not supported by this gateway")]
    Unsupported(&'static str),
}

impl GatewayError {
    /// Build an upstream error, preferring the message from an OpenAI error envelope.
    pub fn upstream(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.trim().to_string()
                }
            });
        GatewayError::Upstream { status, message }
    }

    pub(crate) fn from_reqwest(error: reqwest::Error, timeout_ms: u64) -> Self {
        if error.is_timeout() {
            GatewayError::Timeout(timeout_ms)
        } else {
            GatewayError::Network(error.to_string())
        }
    }
}
