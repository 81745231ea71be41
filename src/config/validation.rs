//! Configuration validation.

use super::types::{BehaviorConfig, CombineConfig, CombinerConfig, MergeConfig, OutputConfig};
use crate::model::SUPPORTED_SPEC_VERSIONS;
use std::path::Path;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for CombinerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.merge.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for MergeConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !SUPPORTED_SPEC_VERSIONS.contains(&self.spec_version.as_str()) {
            errors.push(ConfigError {
                field: "merge.spec_version".to_string(),
                message: format!(
                    "Unsupported CycloneDX version '{}'. Valid options: {}",
                    self.spec_version,
                    SUPPORTED_SPEC_VERSIONS.join(", ")
                ),
            });
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_deref().and_then(Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError {
                    field: "output.file".to_string(),
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for CombineConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.inputs.is_empty() {
            errors.push(ConfigError {
                field: "inputs".to_string(),
                message: "At least one input SBOM is required".to_string(),
            });
        }
        errors.extend(self.merge.validate());
        errors.extend(self.output.validate());
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_merge_config_spec_version_validation() {
        assert!(MergeConfig::default().is_valid());

        for version in SUPPORTED_SPEC_VERSIONS {
            let config = MergeConfig {
                spec_version: (*version).to_string(),
                ..MergeConfig::default()
            };
            assert!(config.is_valid(), "{version} should be accepted");
        }

        let invalid = MergeConfig {
            spec_version: "2.0".to_string(),
            ..MergeConfig::default()
        };
        let errors = invalid.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "merge.spec_version");
    }

    #[test]
    fn test_output_config_parent_must_exist() {
        let ok = OutputConfig {
            file: Some(PathBuf::from("combined.json")),
            ..OutputConfig::default()
        };
        assert!(ok.is_valid());

        let tmp = tempfile::tempdir().expect("tempdir");
        let nested = OutputConfig {
            file: Some(tmp.path().join("combined.json")),
            ..OutputConfig::default()
        };
        assert!(nested.is_valid());

        let missing = OutputConfig {
            file: Some(PathBuf::from("/no/such/dir/combined.json")),
            ..OutputConfig::default()
        };
        assert!(!missing.is_valid());
    }

    #[test]
    fn test_combine_config_requires_inputs() {
        let config = CombineConfig::new(Vec::new(), &CombinerConfig::default());
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "inputs"));
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError {
            field: "test_field".to_string(),
            message: "test error message".to_string(),
        };
        assert_eq!(error.to_string(), "test_field: test error message");
    }
}
