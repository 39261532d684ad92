//! Recursive validation of decoded JSON against a [`SchemaContract`].

use super::contract::{JsonType, SchemaContract};
use serde_json::Value;
use std::fmt;

/// What went wrong at a given location.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    TypeMismatch { expected: JsonType, found: JsonType },
    MissingProperty(String),
    UnexpectedProperty(String),
    NotAllowed(String),
}

/// The first contract violation found, with a `$`-rooted path.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::TypeMismatch { expected, found } => {
                write!(f, "{}: expected {}, found {}", self.path, expected, found)
            }
            ViolationKind::MissingProperty(name) => {
                write!(f, "{}: missing required property '{}'", self.path, name)
            }
            ViolationKind::UnexpectedProperty(name) => {
                write!(f, "{}: property '{}' is not allowed", self.path, name)
            }
            ViolationKind::NotAllowed(value) => {
                write!(f, "{}: {} is not one of the allowed values", self.path, value)
            }
        }
    }
}

impl std::error::Error for Violation {}

/// Check `instance` against `contract`, stopping at the first violation.
///
/// Order per node: type, `enum`, required properties (declared order), declared
/// properties, undeclared properties, then array items in index order.
pub fn validate(instance: &Value, contract: &SchemaContract) -> Result<(), Violation> {
    validate_at(instance, contract, &mut String::from("$"))
}

fn violation(path: &str, kind: ViolationKind) -> Violation {
    Violation {
        path: path.to_string(),
        kind,
    }
}

fn validate_at(
    instance: &Value,
    contract: &SchemaContract,
    path: &mut String,
) -> Result<(), Violation> {
    if let Some(expected) = contract.schema_type {
        if !expected.accepts(instance) {
            return Err(violation(
                path.as_str(),
                ViolationKind::TypeMismatch {
                    expected,
                    found: JsonType::of(instance),
                },
            ));
        }
    }

    if let Some(allowed) = &contract.allowed_values {
        if !allowed.contains(instance) {
            return Err(violation(
                path.as_str(),
                ViolationKind::NotAllowed(instance.to_string()),
            ));
        }
    }

    match instance {
        Value::Object(map) => {
            if let Some(missing) = contract.required.iter().find(|k| !map.contains_key(*k)) {
                return Err(violation(
                    path.as_str(),
                    ViolationKind::MissingProperty(missing.clone()),
                ));
            }
            for (name, sub) in &contract.properties {
                if let Some(value) = map.get(name) {
                    let len = path.len();
                    path.push('.');
                    path.push_str(name);
                    validate_at(value, sub, path)?;
                    path.truncate(len);
                }
            }
            if !contract.allows_additional_properties() {
                if let Some(extra) = map.keys().find(|k| !contract.properties.contains_key(*k)) {
                    return Err(violation(
                        path.as_str(),
                        ViolationKind::UnexpectedProperty(extra.clone()),
                    ));
                }
            }
        }
        Value::Array(items) => {
            if let Some(item_contract) = &contract.items {
                for (i, item) in items.iter().enumerate() {
                    let len = path.len();
                    path.push_str(&format!("[{}]", i));
                    validate_at(item, item_contract, path)?;
                    path.truncate(len);
                }
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn math_contract() -> SchemaContract {
        SchemaContract::from_value(json!({
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
        }))
        .unwrap()
    }

    #[test]
    fn test_validate_accepts_conforming_value() {
        let value = json!({
            "steps": [{"explanation": "Subtract 7", "output": "8x = -30"}],
            "final_answer": "x = -3.75"
        });
        assert!(validate(&value, &math_contract()).is_ok());
    }

    #[test]
    fn test_validate_accepts_empty_steps() {
        // Non-emptiness is a semantic check, not a structural one.
        let value = json!({"steps": [], "final_answer": "x=-3.75"});
        assert!(validate(&value, &math_contract()).is_ok());
    }

    #[test]
    fn test_validate_root_type_mismatch() {
        let err = validate(&json!(["not", "an", "object"]), &math_contract()).unwrap_err();
        assert_eq!(err.path, "$");
        assert_eq!(
            err.kind,
            ViolationKind::TypeMismatch {
                expected: JsonType::Object,
                found: JsonType::Array
            }
        );
    }

    #[test]
    fn test_validate_missing_required() {
        let err = validate(&json!({"steps": []}), &math_contract()).unwrap_err();
        assert_eq!(err.kind, ViolationKind::MissingProperty("final_answer".into()));
        assert_eq!(err.to_string(), "$: missing required property 'final_answer'");
    }

    #[test]
    fn test_validate_nested_path() {
        let value = json!({
            "steps": [
                {"explanation": "ok", "output": "ok"},
                {"explanation": "bad", "output": 42}
            ],
            "final_answer": "x"
        });
        let err = validate(&value, &math_contract()).unwrap_err();
        assert_eq!(err.path, "$.steps[1].output");
        assert_eq!(err.to_string(), "$.steps[1].output: expected string, found integer");
    }

    #[test]
    fn test_validate_additional_properties_rejected() {
        let value = json!({"steps": [], "final_answer": "x", "confidence": 0.9});
        let err = validate(&value, &math_contract()).unwrap_err();
        assert_eq!(err.kind, ViolationKind::UnexpectedProperty("confidence".into()));
    }

    #[test]
    fn test_validate_enum() {
        let contract = SchemaContract::from_value(json!({
            "type": "string",
            "enum": ["positive", "neutral", "negative"]
        }))
        .unwrap();
        assert!(validate(&json!("neutral"), &contract).is_ok());
        let err = validate(&json!("great"), &contract).unwrap_err();
        assert!(matches!(err.kind, ViolationKind::NotAllowed(_)));
    }

    #[test]
    fn test_validate_untyped_contract_accepts_anything() {
        let contract = SchemaContract::default();
        assert!(validate(&json!(null), &contract).is_ok());
        assert!(validate(&json!({"a": [1, 2]}), &contract).is_ok());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn closed_contract(declared: &[String], additional: bool) -> SchemaContract {
            SchemaContract {
                schema_type: Some(JsonType::Object),
                properties: declared
                    .iter()
                    .map(|k| (k.clone(), SchemaContract::of_type(JsonType::String)))
                    .collect(),
                additional_properties: Some(additional),
                ..Default::default()
            }
        }

        proptest! {
            #[test]
            fn prop_additional_properties_flag_decides_extra_keys(
                declared in proptest::collection::btree_set("[a-m]{1,6}", 0..5),
                extra in "[n-z]{1,6}",
            ) {
                let declared: Vec<String> = declared.into_iter().collect();
                let mut object = serde_json::Map::new();
                for key in &declared {
                    object.insert(key.clone(), json!("v"));
                }
                object.insert(extra.clone(), json!("v"));
                let instance = Value::Object(object);

                let closed = validate(&instance, &closed_contract(&declared, false));
                prop_assert_eq!(
                    closed.unwrap_err().kind,
                    ViolationKind::UnexpectedProperty(extra)
                );
                prop_assert!(validate(&instance, &closed_contract(&declared, true)).is_ok());
            }
        }
    }
}
