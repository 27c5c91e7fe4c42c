//! Generator options
//!
//! Options come either from the `[options]` table of an entity manifest or
//! from a plugin-style parameter string (`mapping_alias=ORM,nullable_types=false`).
//! Every option has a default matching Doctrine ORM with Symfony validation.

use crate::GeneratorError;
use serde::Deserialize;

/// Settings shared by every entity generated in one run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Namespace imported for storage mapping annotations
    pub mapping_namespace: String,
    /// Alias of the mapping namespace, used as `@ORM\Column`
    pub mapping_alias: String,
    /// Namespace imported for validation annotations
    pub constraint_namespace: String,
    /// Alias of the constraint namespace, used as `@Assert\Type`
    pub constraint_alias: String,
    /// Collection class backing multi-valued associations
    pub collection_class: String,
    /// Fields `__toString()` prefers, first match wins
    pub to_string_fields: Vec<String>,
    /// Emit `?Type` return types (PHP >= 7.1)
    pub nullable_types: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            mapping_namespace: "Doctrine\\ORM\\Mapping".to_string(),
            mapping_alias: "ORM".to_string(),
            constraint_namespace: "Symfony\\Component\\Validator\\Constraints".to_string(),
            constraint_alias: "Assert".to_string(),
            collection_class: "\\Doctrine\\Common\\Collections\\ArrayCollection".to_string(),
            to_string_fields: ["name", "title", "number", "email"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            nullable_types: true,
        }
    }
}

impl GeneratorOptions {
    /// Parse a `key=value,key=value` parameter string on top of the defaults
    ///
    /// `to_string_fields` takes a `|`-separated list.
    pub fn from_parameter(parameter: &str) -> Result<Self, GeneratorError> {
        let mut options = GeneratorOptions::default();

        for part in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').ok_or_else(|| {
                GeneratorError::InvalidConfig(format!("expected key=value, got '{}'", part))
            })?;
            options.apply(key.trim(), value.trim())?;
        }

        Ok(options)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), GeneratorError> {
        match key {
            "mapping_namespace" => self.mapping_namespace = value.to_string(),
            "mapping_alias" => self.mapping_alias = value.to_string(),
            "constraint_namespace" => self.constraint_namespace = value.to_string(),
            "constraint_alias" => self.constraint_alias = value.to_string(),
            "collection_class" => self.collection_class = value.to_string(),
            "to_string_fields" => {
                self.to_string_fields = value
                    .split('|')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "nullable_types" => self.nullable_types = parse_bool(key, value)?,
            _ => {
                return Err(GeneratorError::InvalidConfig(format!(
                    "unknown option '{}'",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, GeneratorError> {
    match value {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(GeneratorError::InvalidConfig(format!(
            "option '{}' expects a boolean, got '{}'",
            key, value
        ))),
    }
}
