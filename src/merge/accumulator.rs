//! The state threaded through a merge fold.

use super::{MergeOptions, MergeStats};
use crate::error::{Result, SbomCombinerError};
use crate::identity::ComponentIdentity;
use crate::model::{Component, Dependency, Document, Metadata, Tool};
use indexmap::IndexMap;

/// Accumulated tools, components and dependency nodes of one merge call.
///
/// Documents are folded in with [`fold`](Self::fold) in input order and the
/// combined document is produced by [`finish`](Self::finish). Root components
/// are held back until `finish` so that plain components always take
/// precedence over a root describing the same artifact.
pub struct MergeAccumulator<'a> {
    identity: &'a dyn ComponentIdentity,
    dedupe_inner_refs: bool,
    tools: Vec<Tool>,
    components: Vec<Component>,
    dependencies: IndexMap<String, Dependency>,
    deferred_roots: Vec<Component>,
    stats: MergeStats,
}

impl<'a> MergeAccumulator<'a> {
    /// Create an empty accumulator
    #[must_use]
    pub fn new(identity: &'a dyn ComponentIdentity, options: &MergeOptions) -> Self {
        Self {
            identity,
            dedupe_inner_refs: options.dedupe_inner_refs,
            tools: Vec::new(),
            components: Vec::new(),
            dependencies: IndexMap::new(),
            deferred_roots: Vec::new(),
            stats: MergeStats::new(),
        }
    }

    /// Fold one document into the accumulator
    pub fn fold(&mut self, document: Document) -> Result<()> {
        self.stats.documents += 1;

        if let Some(metadata) = document.metadata {
            self.add_tools(metadata.tools);
            if let Some(root) = metadata.component {
                tracing::debug!("Deferring root component {}", root.display_name());
                self.stats.roots_deferred += 1;
                self.deferred_roots.push(root);
            }
        }

        for component in document.components {
            self.stats.components_seen += 1;
            self.add_component(component)?;
        }

        for dependency in document.dependencies {
            self.add_dependency(dependency);
        }

        Ok(())
    }

    /// Append tools not already held
    pub fn add_tools(&mut self, tools: Vec<Tool>) {
        for tool in tools {
            if !self.tools.contains(&tool) {
                self.tools.push(tool);
            }
        }
    }

    /// Append a component unless an equal one is already held.
    ///
    /// Returns whether the component was added.
    pub fn add_component(&mut self, mut component: Component) -> Result<bool> {
        let present = self
            .identity
            .contains(&self.components, &component)
            .map_err(|e| {
                SbomCombinerError::merge_failed(
                    format!(
                        "'{}' identity check failed for {}",
                        self.identity.name(),
                        component.display_name()
                    ),
                    e,
                )
            })?;

        if present {
            tracing::debug!(
                "Discarding duplicate component name={} group={} version={}",
                component.name,
                component.group.as_deref().unwrap_or("-"),
                component.version.as_deref().unwrap_or("-")
            );
            self.stats.components_discarded += 1;
            return Ok(false);
        }

        self.stats.references_normalized += component.normalize_reference_types();
        self.components.push(component);
        self.stats.components_added += 1;
        Ok(true)
    }

    /// Union a dependency node into the graph
    pub fn add_dependency(&mut self, dependency: Dependency) {
        match self.dependencies.get_mut(&dependency.bom_ref) {
            Some(existing) => {
                let appended = existing.absorb(dependency.depends_on, self.dedupe_inner_refs);
                tracing::debug!(
                    "Merged dependency node {} (+{} inner refs)",
                    existing.bom_ref,
                    appended
                );
                self.stats.dependency_nodes_merged += 1;
                self.stats.inner_refs_appended += appended;
            }
            None => {
                self.stats.dependency_nodes_created += 1;
                self.dependencies
                    .insert(dependency.bom_ref.clone(), dependency);
            }
        }
    }

    /// Statistics so far
    #[must_use]
    pub fn stats(&self) -> &MergeStats {
        &self.stats
    }

    /// Flush deferred roots and assemble the combined document
    pub fn finish(mut self, spec_version: &str) -> Result<(Document, MergeStats)> {
        for root in std::mem::take(&mut self.deferred_roots) {
            if self.add_component(root)? {
                self.stats.roots_added += 1;
            }
        }
        self.stats.tools_kept = self.tools.len();

        let mut document = Document::new(spec_version);
        document.metadata = Some(Metadata::with_tools(self.tools));
        document.components = self.components;
        document.dependencies = self.dependencies.into_values().collect();

        Ok((document, self.stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{IdentityError, NameGroupVersion};

    struct Broken;

    impl ComponentIdentity for Broken {
        fn equals(&self, _a: &Component, _b: &Component) -> std::result::Result<bool, IdentityError> {
            Err(IdentityError::Other("comparator unavailable".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_same_ref_within_one_document_merges_in_order() {
        let mut acc = MergeAccumulator::new(&NameGroupVersion, &MergeOptions::default());
        let mut doc = Document::default();
        doc.dependencies = vec![
            Dependency::new("app").depends_on("a"),
            Dependency::new("lib"),
            Dependency::new("app").depends_on("b"),
        ];
        acc.fold(doc).expect("fold");
        let (out, stats) = acc.finish("1.4").expect("finish");
        assert_eq!(out.dependencies.len(), 2);
        assert_eq!(out.dependencies[0].depends_on, vec!["a", "b"]);
        assert_eq!(out.dependencies[1].bom_ref, "lib");
        assert_eq!(stats.dependency_nodes_merged, 1);
    }

    #[test]
    fn test_roots_deduplicated_against_each_other() {
        let mut acc = MergeAccumulator::new(&NameGroupVersion, &MergeOptions::default());
        for _ in 0..2 {
            let mut doc = Document::default();
            doc.metadata = Some(Metadata {
                component: Some(Component::new("app").with_version("1.0")),
                ..Metadata::default()
            });
            acc.fold(doc).expect("fold");
        }
        let (out, stats) = acc.finish("1.4").expect("finish");
        assert_eq!(out.components.len(), 1);
        assert_eq!(stats.roots_deferred, 2);
        assert_eq!(stats.roots_added, 1);
    }

    #[test]
    fn test_identity_failure_is_merge_failed() {
        let mut acc = MergeAccumulator::new(&Broken, &MergeOptions::default());
        assert_eq!(acc.add_component(Component::new("first")).ok(), Some(true));
        let err = acc
            .add_component(Component::new("second"))
            .expect_err("comparator error");
        assert!(matches!(err, SbomCombinerError::MergeFailed { .. }));
        assert!(err.to_string().contains("second"));
    }
}
