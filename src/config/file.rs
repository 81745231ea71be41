//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{CombinerConfig, ConfigOverrides};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".sbom-combiner.yaml",
    ".sbom-combiner.yml",
    "sbom-combiner.yaml",
    "sbom-combiner.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/sbom-combiner/)
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("Config file {} does not exist, searching defaults", path.display());
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    user_config_dir().and_then(|dir| find_config_in_dir(&dir))
}

/// Directory holding the per-user config file
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sbom-combiner"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load a `CombinerConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<CombinerConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(CombinerConfig::default());
    }
    let config: CombinerConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (CombinerConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (CombinerConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (CombinerConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl CombinerConfig {
    /// Layer command-line values over this configuration.
    ///
    /// Only values that were actually given on the command line override.
    pub fn merge_cli(&mut self, cli: &ConfigOverrides) {
        if let Some(identity) = cli.identity {
            self.merge.identity = identity;
        }
        if cli.dedupe_inner_refs {
            self.merge.dedupe_inner_refs = true;
        }
        if let Some(version) = &cli.spec_version {
            self.merge.spec_version.clone_from(version);
        }

        if cli.output_file.is_some() {
            self.output.file.clone_from(&cli.output_file);
        }
        if cli.compact {
            self.output.pretty = false;
        }

        if cli.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli: &ConfigOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge_cli(cli);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = CombinerConfig::default();
    format!(
        r"# SBOM Combiner Configuration
# Place this file at .sbom-combiner.yaml in your project root or ~/.config/sbom-combiner/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# SBOM Combiner Configuration File
# ================================
#
# Place it at:
#   - .sbom-combiner.yaml in your project root
#   - ~/.config/sbom-combiner/sbom-combiner.yaml for global config
#
# CLI arguments always override file settings.

merge:
  # Component identity: name-group-version, purl
  identity: name-group-version
  # Drop repeated inner refs when the same dependency node appears twice
  dedupe_inner_refs: false
  # CycloneDX version written on the combined document: 1.2 - 1.6
  spec_version: '1.4'

output:
  # Output file path (omit for stdout)
  # file: combined-bom.json
  # Pretty-print JSON
  pretty: true

behavior:
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityStrategy;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".sbom-combiner.yaml");
        std::fs::write(&config_path, "merge:\n  identity: purl\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
merge:
  identity: purl
  dedupe_inner_refs: true
  spec_version: '1.5'
output:
  pretty: false
behavior:
  quiet: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.merge.identity, IdentityStrategy::Purl);
        assert!(config.merge.dedupe_inner_refs);
        assert_eq!(config.merge.spec_version, "1.5");
        assert!(!config.output.pretty);
        assert!(config.behavior.quiet);
    }

    #[test]
    fn test_load_empty_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "").unwrap();
        assert_eq!(
            load_config_file(&config_path).unwrap(),
            CombinerConfig::default()
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_falls_back_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "merge: [unclosed").unwrap();

        let (config, loaded_from) = load_or_default(Some(&config_path));
        assert_eq!(config, CombinerConfig::default());
        assert!(loaded_from.is_none());
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut base = CombinerConfig::default();
        base.merge.spec_version = "1.5".to_string();

        base.merge_cli(&ConfigOverrides {
            identity: Some(IdentityStrategy::Purl),
            compact: true,
            output_file: Some(PathBuf::from("out.json")),
            ..ConfigOverrides::default()
        });

        assert_eq!(base.merge.identity, IdentityStrategy::Purl);
        assert_eq!(base.merge.spec_version, "1.5");
        assert!(!base.output.pretty);
        assert_eq!(base.output.file, Some(PathBuf::from("out.json")));
        assert!(!base.behavior.quiet);
    }

    #[test]
    fn test_generated_examples_parse() {
        let example = generate_example_config();
        assert!(example.contains("merge:"));
        let parsed: CombinerConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, CombinerConfig::default());

        let full: CombinerConfig =
            serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, CombinerConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "behavior:\n  quiet: true\n").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
