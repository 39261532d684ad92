//! Typed JSON-schema subset used for structured output and tool parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// JSON value types a contract can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl JsonType {
    /// The most specific type of a decoded value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => JsonType::Object,
            Value::Array(_) => JsonType::Array,
            Value::String(_) => JsonType::String,
            Value::Number(n) if n.is_i64() || n.is_u64() => JsonType::Integer,
            Value::Number(_) => JsonType::Number,
            Value::Bool(_) => JsonType::Boolean,
            Value::Null => JsonType::Null,
        }
    }

    /// Whether `value` satisfies this declared type.
    ///
    /// `number` accepts integers; `integer` accepts floats with no fractional part.
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (JsonType::Number, Value::Number(_)) => true,
            (JsonType::Integer, Value::Number(n)) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            _ => JsonType::of(value) == self,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Integer => "integer",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A malformed contract definition. Always fatal to a run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("not a valid schema document: {0}")]
    Decode(String),

    #[error("{path}: {message}")]
    Inconsistent { path: String, message: String },
}

/// Declarative structural requirement for a JSON value.
///
/// Mirrors the JSON-schema keywords the gateway forwards for structured output:
/// `type`, `properties`, `required`, `items`, `additionalProperties` and `enum`.
/// Unknown keywords such as `title` are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaContract {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<JsonType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaContract>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaContract>>,

    /// `None` behaves like `true`.
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<Value>>,
}

impl SchemaContract {
    /// Decode a contract from its JSON form and check it for consistency.
    pub fn from_value(value: Value) -> Result<Self, ContractError> {
        let contract: SchemaContract =
            serde_json::from_value(value).map_err(|e| ContractError::Decode(e.to_string()))?;
        contract.check_definition()?;
        Ok(contract)
    }

    /// JSON form, as sent in a `response_format` directive.
    pub fn to_value(&self) -> Value {
        // Plain structs and maps of strings always serialize.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Shorthand for a leaf contract of one type.
    pub fn of_type(schema_type: JsonType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    pub fn allows_additional_properties(&self) -> bool {
        self.additional_properties.unwrap_or(true)
    }

    /// Reject definitions that no value could satisfy or that misuse keywords.
    pub fn check_definition(&self) -> Result<(), ContractError> {
        self.check_at("$")
    }

    fn check_at(&self, path: &str) -> Result<(), ContractError> {
        let inconsistent = |message: String| ContractError::Inconsistent {
            path: path.to_string(),
            message,
        };

        if let Some(t) = self.schema_type {
            let has_object_keywords = !self.properties.is_empty()
                || !self.required.is_empty()
                || self.additional_properties.is_some();
            if has_object_keywords && t != JsonType::Object {
                return Err(inconsistent(format!(
                    "object keywords used on a '{}' schema",
                    t
                )));
            }
            if self.items.is_some() && t != JsonType::Array {
                return Err(inconsistent(format!("'items' used on a '{}' schema", t)));
            }
        }

        if !self.allows_additional_properties() {
            if let Some(name) = self
                .required
                .iter()
                .find(|name| !self.properties.contains_key(name.as_str()))
            {
                return Err(inconsistent(format!(
                    "required property '{}' is not declared and additional properties are forbidden",
                    name
                )));
            }
        }

        if let Some(values) = &self.allowed_values {
            if values.is_empty() {
                return Err(inconsistent("'enum' must list at least one value".to_string()));
            }
        }

        for (name, child) in &self.properties {
            child.check_at(&format!("{}.{}", path, name))?;
        }
        if let Some(items) = &self.items {
            items.check_at(&format!("{}[]", path))?;
        }
        Ok(())
    }
}
