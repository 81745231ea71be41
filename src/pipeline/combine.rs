//! Load-then-merge orchestration.

use crate::error::{ErrorContext, Result};
use crate::identity::IdentityStrategy;
use crate::loader::{DocumentLoader, DocumentSource, StreamSource};
use crate::merge::{MergeEngine, MergeOptions, MergeStats};
use crate::model::Document;
use std::path::Path;

/// Loads document sources and folds them through a [`MergeEngine`].
///
/// Each source is loaded and folded before the next one is touched, so at
/// most one input file or stream is open at a time. The first load or merge
/// failure aborts the run and no combined document is returned.
#[derive(Debug, Default)]
pub struct Combiner {
    loader: DocumentLoader,
    engine: MergeEngine,
}

impl Combiner {
    /// Create a combiner with the default loader and engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom loader
    #[must_use]
    pub fn with_loader(mut self, loader: DocumentLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Use a custom merge engine
    #[must_use]
    pub fn with_engine(mut self, engine: MergeEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Build a combiner from an identity strategy and merge options
    #[must_use]
    pub fn from_settings(strategy: IdentityStrategy, options: MergeOptions) -> Self {
        Self::new().with_engine(MergeEngine::new().with_strategy(strategy).with_options(options))
    }

    /// Get the merge engine
    #[must_use]
    pub fn engine(&self) -> &MergeEngine {
        &self.engine
    }

    /// Combine heterogeneous sources in order
    pub fn combine(&self, sources: Vec<DocumentSource>) -> Result<Document> {
        self.combine_with_stats(sources).map(|(document, _)| document)
    }

    /// Combine heterogeneous sources in order and report merge statistics
    pub fn combine_with_stats(&self, sources: Vec<DocumentSource>) -> Result<(Document, MergeStats)> {
        tracing::debug!(
            "Combining {} sources with '{}' identity",
            sources.len(),
            self.engine.identity_name()
        );

        let mut acc = self.engine.accumulator();
        for (index, source) in sources.into_iter().enumerate() {
            let description = source.describe();
            let document = self.loader.load(source)?;
            acc.fold(document)
                .with_context(|| format!("input #{} ({description})", index + 1))?;
        }
        let (document, stats) = acc.finish(&self.engine.options().spec_version)?;
        stats.log_summary();
        Ok((document, stats))
    }

    /// Combine files in order
    pub fn combine_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Document> {
        self.combine(
            paths
                .iter()
                .map(|p| DocumentSource::from(p.as_ref()))
                .collect(),
        )
    }

    /// Combine byte streams in order
    pub fn combine_streams(&self, streams: Vec<Box<dyn StreamSource>>) -> Result<Document> {
        self.combine(streams.into_iter().map(DocumentSource::Stream).collect())
    }
}

/// Combine SBOM files using default settings
pub fn combine_sboms_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Document> {
    Combiner::new().combine_paths(paths)
}

/// Combine SBOM streams using default settings
pub fn combine_sboms_from_streams(streams: Vec<Box<dyn StreamSource>>) -> Result<Document> {
    Combiner::new().combine_streams(streams)
}
