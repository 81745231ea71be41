//! Combine command handler.
//!
//! Implements the `combine` subcommand: load every input, merge, and write the
//! combined `CycloneDX` JSON document.

use crate::config::{CombineConfig, Validatable};
use crate::loader::{DocumentSource, ReaderSource};
use crate::pipeline::{exit_codes, to_json_string, write_output, Combiner, OutputTarget};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Input name that reads a document from standard input
pub const STDIN_INPUT: &str = "-";

/// Run the combine command
#[allow(clippy::needless_pass_by_value)]
pub fn run_combine(config: CombineConfig) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid combine configuration:\n  {}", details.join("\n  "));
    }
    if config.inputs.iter().filter(|p| is_stdin(p)).count() > 1 {
        bail!("Standard input ('{STDIN_INPUT}') can only be used once");
    }

    if !config.quiet {
        tracing::info!(
            "Combining {} SBOMs ({} identity, CycloneDX {})",
            config.inputs.len(),
            config.merge.identity,
            config.merge.spec_version
        );
    }

    let sources: Vec<DocumentSource> = config.inputs.iter().map(|p| to_source(p)).collect();
    let combiner = Combiner::from_settings(config.merge.identity, config.merge.to_options());
    let (document, stats) = combiner
        .combine_with_stats(sources)
        .context("Failed to combine SBOMs")?;

    if config.show_stats {
        let json = serde_json::to_string_pretty(&stats).context("failed to serialize stats")?;
        eprintln!("{json}");
    }

    let content =
        to_json_string(&document, config.output.pretty).context("failed to serialize output")?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&content, &target, config.quiet)?;

    Ok(exit_codes::SUCCESS)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_INPUT
}

fn to_source(path: &Path) -> DocumentSource {
    if is_stdin(path) {
        DocumentSource::stream(ReaderSource::new("<stdin>", std::io::stdin()))
    } else {
        DocumentSource::from(path)
    }
}
