// File: src/config.rs
// Purpose: Validator configuration parsing from formguard.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidatorConfig {
    #[serde(default)]
    pub triggers: TriggerConfig,

    #[serde(default)]
    pub presentation: PresentationConfig,

    #[serde(default)]
    pub aggregation: AggregationConfig,
}

/// Which field events the validator reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Run the field's rules when it loses focus (default: true)
    #[serde(default = "default_true")]
    pub validate_on_blur: bool,

    /// Clear the field's error as soon as its value changes (default: true)
    #[serde(default = "default_true")]
    pub clear_on_input: bool,
}

/// Error rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// When false every field runs detached: rules still gate submission
    /// but nothing is rendered
    #[serde(default = "default_true")]
    pub render_errors: bool,
}

/// How field values are collected into `FormValues` on submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    #[serde(default)]
    pub checkbox_policy: CheckboxPolicy,

    /// Leave disabled fields out of validation and aggregation (default: true)
    #[serde(default = "default_true")]
    pub skip_disabled: bool,
}

/// Aggregation of checkbox groups sharing one name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CheckboxPolicy {
    /// Checked values in document order; an empty list only when none is checked
    #[default]
    CheckedFirst,
    /// Walk boxes in document order: an unchecked box resets the value to an
    /// empty string, a checked box appends to a list. Kept for exact parity
    /// with legacy form scripts.
    DocumentOrder,
}

fn default_true() -> bool {
    true
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            validate_on_blur: true,
            clear_on_input: true,
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            render_errors: true,
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            checkbox_policy: CheckboxPolicy::default(),
            skip_disabled: true,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./formguard.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formguard.toml")
    }

    /// Parse configuration from TOML text; blank text yields defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert!(config.triggers.validate_on_blur);
        assert!(config.triggers.clear_on_input);
        assert!(config.presentation.render_errors);
        assert_eq!(config.aggregation.checkbox_policy, CheckboxPolicy::CheckedFirst);
        assert!(config.aggregation.skip_disabled);
    }

    #[test]
    fn test_empty_config() {
        let config = ValidatorConfig::from_toml_str("  \n").unwrap();
        assert_eq!(config, ValidatorConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [presentation]
            render_errors = false

            [aggregation]
            checkbox_policy = "document-order"
        "#;
        let config = ValidatorConfig::from_toml_str(toml).unwrap();
        assert!(!config.presentation.render_errors);
        assert_eq!(config.aggregation.checkbox_policy, CheckboxPolicy::DocumentOrder);
        assert!(config.aggregation.skip_disabled);
        assert!(config.triggers.validate_on_blur);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let toml = r#"
            [aggregation]
            checkbox_policy = "random"
        "#;
        assert!(ValidatorConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ValidatorConfig::load("does/not/exist/formguard.toml").unwrap();
        assert_eq!(config, ValidatorConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir()
            .join(format!("formguard-config-{}.toml", std::process::id()));
        fs::write(&path, "[triggers]\nclear_on_input = false\n").unwrap();

        let config = ValidatorConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(!config.triggers.clear_on_input);
        assert!(config.triggers.validate_on_blur);
    }
}
