//! Schema contracts and the structural validator.
//!
//! A [`SchemaContract`] is the typed form of the JSON-schema subset a gateway forwards
//! for structured output. [`validate`] walks a decoded value against it and reports
//! the first [`Violation`] with a `$`-rooted path such as `$.steps[1].output`.

pub mod contract;
pub mod validator;

pub use contract::{ContractError, JsonType, SchemaContract};
pub use validator::{validate, Violation, ViolationKind};
