//! Tool-call argument resolution and parameter checks.

use crate::gateway::{ToolArguments, ToolDeclaration};
use crate::schema::JsonType;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a tool call's arguments were rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("arguments text is not valid JSON ({message}): {raw}")]
    Unparsable { raw: String, message: String },

    #[error("arguments decoded to {found}, expected an object")]
    NotAnObject { found: JsonType },

    #[error("arguments payload is {found}, expected an object or JSON text")]
    UnsupportedEncoding { found: JsonType },

    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("parameter '{name}' should be {expected}, found {found}")]
    WrongType {
        name: String,
        expected: JsonType,
        found: JsonType,
    },
}

/// Normalize a tool-call arguments payload into one mapping.
///
/// A decoded mapping is returned unchanged; JSON text is parsed and must hold an
/// object; anything else is rejected.
pub fn resolve(raw: &ToolArguments) -> Result<Map<String, Value>, ArgumentError> {
    match raw {
        ToolArguments::Decoded(map) => Ok(map.clone()),
        ToolArguments::Encoded(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ArgumentError::NotAnObject {
                found: JsonType::of(&other),
            }),
            Err(e) => Err(ArgumentError::Unparsable {
                raw: text.clone(),
                message: e.to_string(),
            }),
        },
        ToolArguments::Other(value) => Err(ArgumentError::UnsupportedEncoding {
            found: JsonType::of(value),
        }),
    }
}

/// A parameter the model must supply. `json_type: None` accepts any value.
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredParameter {
    pub name: String,
    pub json_type: Option<JsonType>,
}

/// The tool call a scenario expects: which function, with which parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolExpectation {
    pub name: String,
    pub required: Vec<RequiredParameter>,
}

impl ToolExpectation {
    /// Derive the expectation from the declaration sent to the model.
    pub fn from_declaration(declaration: &ToolDeclaration) -> Self {
        let parameters = &declaration.parameters;
        let required = parameters
            .required
            .iter()
            .map(|name| RequiredParameter {
                name: name.clone(),
                json_type: parameters
                    .properties
                    .get(name)
                    .and_then(|p| p.schema_type),
            })
            .collect();
        Self {
            name: declaration.name.clone(),
            required,
        }
    }

    /// Every required parameter is present with the declared primitive type.
    pub fn check_parameters(&self, arguments: &Map<String, Value>) -> Result<(), ArgumentError> {
        for param in &self.required {
            let value = arguments
                .get(&param.name)
                .ok_or_else(|| ArgumentError::MissingParameter(param.name.clone()))?;
            if let Some(expected) = param.json_type {
                if !expected.accepts(value) {
                    return Err(ArgumentError::WrongType {
                        name: param.name.clone(),
                        expected,
                        found: JsonType::of(value),
                    });
                }
            }
        }
        Ok(())
    }
}
