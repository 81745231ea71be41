//! Output handling for combined documents.

use crate::error::{Result as CombinerResult, SbomCombinerError};
use crate::model::Document;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }

}

/// Serialize a document as `CycloneDX` JSON
pub fn to_json_string(document: &Document, pretty: bool) -> CombinerResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    };
    json.map_err(|e| SbomCombinerError::output("serializing combined document", e))
}

/// Serialize a document as `CycloneDX` JSON into a writer
pub fn write_document<W: Write>(document: &Document, writer: W, pretty: bool) -> CombinerResult<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(writer, document)
    } else {
        serde_json::to_writer(writer, document)
    };
    written.map_err(|e| SbomCombinerError::output("writing combined document", e))
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Combined SBOM written to {}", path.display());
            }
            Ok(())
        }
    }
}
