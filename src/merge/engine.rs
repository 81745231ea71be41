//! Merge engine implementation.

use super::{MergeAccumulator, MergeOptions, MergeStats};
use crate::error::Result;
use crate::identity::{ComponentIdentity, IdentityStrategy, NameGroupVersion};
use crate::model::Document;

/// Combines parsed SBOM documents into one.
pub struct MergeEngine {
    identity: Box<dyn ComponentIdentity>,
    options: MergeOptions,
}

impl MergeEngine {
    /// Create a merge engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            identity: Box::new(NameGroupVersion),
            options: MergeOptions::default(),
        }
    }

    /// Set a custom identity comparator
    #[must_use]
    pub fn with_identity(mut self, identity: Box<dyn ComponentIdentity>) -> Self {
        self.identity = identity;
        self
    }

    /// Use one of the built-in identity strategies
    #[must_use]
    pub fn with_strategy(self, strategy: IdentityStrategy) -> Self {
        self.with_identity(strategy.build())
    }

    /// Set merge options
    #[must_use]
    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the merge options
    #[must_use]
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Name of the identity comparator in use
    #[must_use]
    pub fn identity_name(&self) -> &str {
        self.identity.name()
    }

    /// Start an empty fold using this engine's settings
    #[must_use]
    pub fn accumulator(&self) -> MergeAccumulator<'_> {
        MergeAccumulator::new(self.identity.as_ref(), &self.options)
    }

    /// Merge documents in order
    pub fn merge(&self, documents: impl IntoIterator<Item = Document>) -> Result<Document> {
        self.merge_with_stats(documents).map(|(document, _)| document)
    }

    /// Merge documents in order and report what the fold did
    pub fn merge_with_stats(
        &self,
        documents: impl IntoIterator<Item = Document>,
    ) -> Result<(Document, MergeStats)> {
        let mut acc = self.accumulator();
        for document in documents {
            acc.fold(document)?;
        }
        let (document, stats) = acc.finish(&self.options.spec_version)?;
        stats.log_summary();
        Ok((document, stats))
    }
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MergeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeEngine")
            .field("identity", &self.identity.name())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SbomCombinerError;
    use crate::model::{Component, Dependency, ExternalRefType, ExternalReference, Metadata, Tool};

    fn doc_with(components: Vec<Component>) -> Document {
        let mut doc = Document::default();
        doc.components = components;
        doc
    }

    fn maven_tool() -> Tool {
        Tool::new(Some("CycloneDX"), Some("cyclonedx-maven-plugin"), Some("2.7.9"))
    }

    #[test]
    fn test_merge_empty_input() {
        let out = MergeEngine::new().merge(Vec::new()).expect("merge");
        assert!(out.components.is_empty());
        assert!(out.dependencies.is_empty());
        let metadata = out.metadata.expect("metadata always present");
        assert!(metadata.tools.is_empty());
        assert_eq!(out.spec_version, "1.4");
    }

    #[test]
    fn test_single_document_counts_preserved() {
        let mut doc = doc_with(vec![
            Component::new("a").with_version("1"),
            Component::new("b").with_version("1"),
        ]);
        doc.dependencies = vec![Dependency::new("a").depends_on("b"), Dependency::new("b")];
        let out = MergeEngine::new().merge(vec![doc]).expect("merge");
        assert_eq!(out.component_count(), 2);
        assert_eq!(out.dependency_count(), 2);
    }

    #[test]
    fn test_first_seen_component_wins() {
        let mut first = Component::new("guava")
            .with_group("com.google.guava")
            .with_version("32.1.2-jre");
        first.description = Some("first".to_string());
        let mut second = first.clone();
        second.description = Some("second".to_string());

        let out = MergeEngine::new()
            .merge(vec![doc_with(vec![first]), doc_with(vec![second])])
            .expect("merge");
        assert_eq!(out.component_count(), 1);
        assert_eq!(out.components[0].description.as_deref(), Some("first"));
    }

    #[test]
    fn test_tools_unioned() {
        let mut a = Document::default();
        a.metadata = Some(Metadata::with_tools(vec![maven_tool()]));
        let mut b = Document::default();
        b.metadata = Some(Metadata::with_tools(vec![
            maven_tool(),
            Tool::new(Some("anchore"), Some("syft"), Some("1.0.0")),
        ]));

        let out = MergeEngine::new().merge(vec![a, b]).expect("merge");
        assert_eq!(out.tools().len(), 2);
        assert_eq!(out.tools()[0], maven_tool());
    }

    #[test]
    fn test_dependency_inner_refs_concatenated() {
        let mut a = Document::default();
        a.dependencies = vec![Dependency::new("app").depends_on("x").depends_on("y")];
        let mut b = Document::default();
        b.dependencies = vec![Dependency::new("app").depends_on("z")];

        let out = MergeEngine::new().merge(vec![a, b]).expect("merge");
        assert_eq!(out.dependency_count(), 1);
        assert_eq!(out.dependencies[0].depends_on, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_repeated_inner_refs_accumulate_unless_deduped() {
        let doc = || {
            let mut d = Document::default();
            d.dependencies = vec![Dependency::new("app").depends_on("x")];
            d
        };

        let out = MergeEngine::new().merge(vec![doc(), doc()]).expect("merge");
        assert_eq!(out.dependencies[0].depends_on, vec!["x", "x"]);

        let engine = MergeEngine::new().with_options(MergeOptions {
            dedupe_inner_refs: true,
            ..MergeOptions::default()
        });
        let out = engine.merge(vec![doc(), doc()]).expect("merge");
        assert_eq!(out.dependencies[0].depends_on, vec!["x"]);
    }

    #[test]
    fn test_reference_types_normalized() {
        let component = Component::new("commons-io")
            .with_external_reference(ExternalReference::untyped("https://example.org/io"))
            .with_external_reference(ExternalReference::new(
                ExternalRefType::Vcs,
                "https://example.org/io.git",
            ));
        let (out, stats) = MergeEngine::new()
            .merge_with_stats(vec![doc_with(vec![component])])
            .expect("merge");
        let refs = &out.components[0].external_references;
        assert_eq!(refs[0].ref_type, Some(ExternalRefType::Other));
        assert_eq!(refs[1].ref_type, Some(ExternalRefType::Vcs));
        assert_eq!(stats.references_normalized, 1);
    }

    #[test]
    fn test_root_component_yields_to_inner_component() {
        let mut root = Component::new("app").with_version("1.0");
        root.description = Some("root copy".to_string());
        let mut inner = Component::new("app").with_version("1.0");
        inner.description = Some("inner copy".to_string());

        let mut a = Document::default();
        a.metadata = Some(Metadata {
            component: Some(root),
            ..Metadata::default()
        });
        let b = doc_with(vec![inner]);

        let (out, stats) = MergeEngine::new().merge_with_stats(vec![a, b]).expect("merge");
        assert_eq!(out.component_count(), 1);
        assert_eq!(out.components[0].description.as_deref(), Some("inner copy"));
        assert_eq!(stats.roots_added, 0);
        assert!(out.root_component().is_none());
    }

    #[test]
    fn test_input_metadata_not_copied() {
        let mut a = Document::default();
        a.metadata = Some(Metadata {
            timestamp: Some("2023-01-01T00:00:00Z".to_string()),
            tools: vec![maven_tool()],
            ..Metadata::default()
        });
        let out = MergeEngine::new().merge(vec![a]).expect("merge");
        let metadata = out.metadata.expect("metadata");
        assert!(metadata.timestamp.is_none());
        assert_eq!(metadata.tools, vec![maven_tool()]);
    }

    #[test]
    fn test_purl_identity_malformed_purl_fails_merge() {
        let engine = MergeEngine::new().with_strategy(IdentityStrategy::Purl);
        assert_eq!(engine.identity_name(), "purl");
        let a = doc_with(vec![Component::new("x").with_purl("pkg:npm/x@1")]);
        let b = doc_with(vec![Component::new("x").with_purl("garbage")]);
        let err = engine.merge(vec![a, b]).expect_err("malformed purl");
        assert!(matches!(err, SbomCombinerError::MergeFailed { .. }));
    }

    #[test]
    fn test_merge_is_deterministic() {
        let build = || {
            let mut a = doc_with(vec![Component::new("b"), Component::new("a")]);
            a.dependencies = vec![Dependency::new("b").depends_on("a")];
            let mut b = doc_with(vec![Component::new("c"), Component::new("a")]);
            b.dependencies = vec![Dependency::new("c"), Dependency::new("b").depends_on("c")];
            vec![a, b]
        };
        let engine = MergeEngine::new();
        let first = engine.merge(build()).expect("merge");
        let second = engine.merge(build()).expect("merge");
        assert_eq!(first.content_hash(), second.content_hash());
        assert_eq!(
            serde_json::to_string(&first).expect("json"),
            serde_json::to_string(&second).expect("json")
        );
    }
}
