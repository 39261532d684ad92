//! Conformance harness for OpenAI-compatible chat-completion gateways
//!
//! This library checks, per model identifier, that a gateway honours three
//! response contracts: plain text, tool calling and schema-constrained JSON.
//! It validates each response, resolves tool-call arguments and aggregates the
//! outcomes into per-model reports.

pub mod checks;
pub mod cli;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod scenario;
pub mod schema;
pub mod suite;
