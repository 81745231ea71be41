//! Configuration types for sbom-combiner.

use crate::identity::IdentityStrategy;
use crate::merge::MergeOptions;
use crate::model::DEFAULT_SPEC_VERSION;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loadable from a YAML file.
///
/// Every section has defaults, so an empty file is a valid configuration.
/// CLI flags are layered on top with [`CombinerConfig::merge_cli`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CombinerConfig {
    /// How documents are merged
    pub merge: MergeConfig,
    /// Where and how the combined document is written
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl CombinerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Merge-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MergeConfig {
    /// Component identity policy
    pub identity: IdentityStrategy,
    /// Drop repeated inner refs when unioning dependency nodes
    pub dedupe_inner_refs: bool,
    /// `CycloneDX` spec version of the combined document
    pub spec_version: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            identity: IdentityStrategy::default(),
            dedupe_inner_refs: false,
            spec_version: DEFAULT_SPEC_VERSION.to_string(),
        }
    }
}

impl MergeConfig {
    /// The engine options this section describes
    #[must_use]
    pub fn to_options(&self) -> MergeOptions {
        MergeOptions {
            spec_version: self.spec_version.clone(),
            dedupe_inner_refs: self.dedupe_inner_refs,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Pretty-print the JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: None,
            pretty: true,
        }
    }
}

/// Behavior flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// CLI overrides
// ============================================================================

/// Values given on the command line. `None`/`false` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub output_file: Option<PathBuf>,
    pub identity: Option<IdentityStrategy>,
    pub dedupe_inner_refs: bool,
    pub spec_version: Option<String>,
    pub compact: bool,
    pub quiet: bool,
}

// ============================================================================
// Per-run configuration
// ============================================================================

/// Fully resolved configuration for one `combine` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineConfig {
    /// Input documents, in merge order
    pub inputs: Vec<PathBuf>,
    pub merge: MergeConfig,
    pub output: OutputConfig,
    /// Print merge statistics to stderr
    pub show_stats: bool,
    pub quiet: bool,
}

impl CombineConfig {
    /// Resolve a run from inputs and the layered configuration
    #[must_use]
    pub fn new(inputs: Vec<PathBuf>, config: &CombinerConfig) -> Self {
        Self {
            inputs,
            merge: config.merge.clone(),
            output: config.output.clone(),
            show_stats: false,
            quiet: config.behavior.quiet,
        }
    }

    #[must_use]
    pub const fn with_stats(mut self, show: bool) -> Self {
        self.show_stats = show;
        self
    }
}
