//! **Combine independently produced SBOMs into one inventory.**
//!
//! `sbom-combiner` takes the `CycloneDX` documents emitted by separate
//! sub-builds and folds them into a single document that describes the union
//! of their components, dependency relationships and producing tools.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`Document`] type shared by inputs and the combined output.
//! - **[`parsers`]**: `CycloneDX` JSON and XML parsing behind the [`DocumentParser`] trait.
//! - **[`loader`]**: resolves [`DocumentSource`]s (paths, streams, parsed documents).
//! - **[`identity`]**: pluggable [`ComponentIdentity`] policies deciding when two
//!   components are the same.
//! - **[`merge`]**: the [`MergeEngine`] fold.
//! - **[`pipeline`]**: the [`Combiner`] facade and output helpers.
//! - **[`config`]**: YAML configuration with validation.
//!
//! ## Getting Started
//!
//! ```no_run
//! use sbom_combiner::combine_sboms_from_paths;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let combined = combine_sboms_from_paths(&["core/bom.json", "web/bom.xml"])?;
//!     println!(
//!         "{} components, {} dependency nodes, {} tools",
//!         combined.component_count(),
//!         combined.dependency_count(),
//!         combined.tools().len()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ### Custom identity and options
//!
//! ```no_run
//! use sbom_combiner::{Combiner, DocumentSource, BytesSource, MergeEngine, MergeOptions};
//! use sbom_combiner::identity::IdentityStrategy;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = MergeEngine::new()
//!         .with_strategy(IdentityStrategy::Purl)
//!         .with_options(MergeOptions { dedupe_inner_refs: true, ..MergeOptions::default() });
//!
//!     let combined = Combiner::new().with_engine(engine).combine(vec![
//!         DocumentSource::from("base.json"),
//!         DocumentSource::stream(BytesSource::new("upload", std::fs::read("extra.json")?)),
//!     ])?;
//!     sbom_combiner::write_document(&combined, std::io::stdout(), true)?;
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod loader;
pub mod merge;
pub mod model;
pub mod parsers;
pub mod pipeline;

// Re-export main types for convenience
pub use config::{CombineConfig, CombinerConfig, ConfigError, Validatable};
pub use error::{ErrorContext, Result, SbomCombinerError};
pub use identity::{ComponentIdentity, IdentityStrategy, NameGroupVersion, PurlIdentity};
pub use loader::{BytesSource, DocumentLoader, DocumentSource, ReaderSource, StreamSource};
pub use merge::{MergeAccumulator, MergeEngine, MergeOptions, MergeStats};
pub use model::{Component, Dependency, Document, ExternalRefType, ExternalReference, Tool};
pub use parsers::{CycloneDxParser, DocumentParser, ParseError};
pub use pipeline::{
    combine_sboms_from_paths, combine_sboms_from_streams, to_json_string, write_document,
    Combiner,
};
