//! Scenario tuning knobs

use super::ConfigError;
use crate::schema::SchemaContract;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scenario configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Sampling temperature for the plain chat scenario.
    pub temperature: f32,
    /// JSON file holding a replacement contract for the structured scenario.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_schema_path: Option<PathBuf>,
    /// JSON pointers into structured output that must be non-empty.
    pub non_empty: Vec<String>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            structured_schema_path: None,
            non_empty: vec!["/steps".to_string()],
        }
    }
}

impl ScenarioConfig {
    /// Load the replacement structured-output contract, if one is configured.
    ///
    /// Every `non_empty` pointer must start at a property the replacement
    /// declares, otherwise the check could never pass.
    pub fn load_structured_contract(&self) -> Result<Option<SchemaContract>, ConfigError> {
        let Some(path) = &self.structured_schema_path else {
            return Ok(None);
        };
        if !path.exists() {
            return Err(ConfigError::NotFound(path.clone()));
        }
        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;
        let contract = SchemaContract::from_value(value).map_err(|source| ConfigError::Contract {
            name: path.display().to_string(),
            source,
        })?;
        self.check_pointers_against(&contract, path)?;
        Ok(Some(contract))
    }

    fn check_pointers_against(
        &self,
        contract: &SchemaContract,
        path: &Path,
    ) -> Result<(), ConfigError> {
        for (i, pointer) in self.non_empty.iter().enumerate() {
            let Some(rest) = pointer.strip_prefix('/') else {
                continue;
            };
            let head = rest.split('/').next().unwrap_or_default();
            let property = head.replace("~1", "/").replace("~0", "~");
            if !contract.properties.contains_key(&property) {
                return Err(ConfigError::validation(
                    format!("scenarios.non_empty[{}]", i),
                    format!(
                        "'{}' does not start at a property declared by {}",
                        pointer,
                        path.display()
                    ),
                ));
            }
        }
        Ok(())
    }
}
