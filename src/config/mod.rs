//! Configuration module for sbom-combiner.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.sbom-combiner.yaml` file in your project root or
//! `~/.config/sbom-combiner/`:
//!
//! ```yaml
//! merge:
//!   identity: purl
//!   spec_version: '1.5'
//! output:
//!   pretty: false
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    BehaviorConfig, CombineConfig, CombinerConfig, ConfigOverrides, MergeConfig, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, user_config_dir, ConfigFileError,
};

/// Generate a JSON Schema for the `CombinerConfig` file format.
///
/// Editors can use it for validation and autocompletion of
/// `.sbom-combiner.yaml` files.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(CombinerConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().expect("schema");
        assert!(schema.contains("\"merge\""));
        assert!(schema.contains("\"output\""));
        assert!(schema.contains("name-group-version"));
    }
}
