//! Core SBOM document structure.

use super::{Component, Dependency, Metadata, Tool};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use xxhash_rust::xxh3::xxh3_64;

/// Default `CycloneDX` spec version for documents created by this crate
pub const DEFAULT_SPEC_VERSION: &str = "1.4";

/// `CycloneDX` spec versions this crate reads and writes
pub const SUPPORTED_SPEC_VERSIONS: &[&str] = &["1.2", "1.3", "1.4", "1.5", "1.6"];

fn default_bom_format() -> String {
    "CycloneDX".to_string()
}

fn default_spec_version() -> String {
    DEFAULT_SPEC_VERSION.to_string()
}

/// A parsed SBOM document.
///
/// Inputs and the combined output share this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default = "default_bom_format")]
    pub bom_format: String,
    #[serde(default = "default_spec_version")]
    pub spec_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Top-level fields not interpreted by the combiner
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Create an empty document for the given spec version
    #[must_use]
    pub fn new(spec_version: impl Into<String>) -> Self {
        Self {
            bom_format: default_bom_format(),
            spec_version: spec_version.into(),
            serial_number: None,
            version: Some(1),
            metadata: None,
            components: Vec::new(),
            dependencies: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Tools recorded in the metadata, empty if there is no metadata
    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        match &self.metadata {
            Some(metadata) => &metadata.tools,
            None => &[],
        }
    }

    /// The component this document itself describes, if declared
    #[must_use]
    pub fn root_component(&self) -> Option<&Component> {
        self.metadata.as_ref().and_then(|m| m.component.as_ref())
    }

    /// Get total component count
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Get total dependency node count
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Look up a dependency node by ref
    #[must_use]
    pub fn find_dependency(&self, bom_ref: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| d.bom_ref == bom_ref)
    }

    /// Hash of the component and dependency lists in their current order.
    ///
    /// Two documents with equal hashes have the same components and
    /// dependencies in the same order.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut hasher_input = Vec::new();
        if let Ok(components) = serde_json::to_vec(&self.components) {
            hasher_input.extend(components);
        }
        if let Ok(dependencies) = serde_json::to_vec(&self.dependencies) {
            hasher_input.extend(dependencies);
        }
        xxh3_64(&hasher_input)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_SPEC_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "bomFormat": "CycloneDX",
        "specVersion": "1.5",
        "serialNumber": "urn:uuid:3e671687-395b-41f5-a30f-a58921a69b79",
        "version": 1,
        "metadata": {
            "tools": [{"vendor": "CycloneDX", "name": "cyclonedx-gradle-plugin", "version": "1.7.4"}],
            "component": {"type": "application", "bom-ref": "app", "name": "app", "version": "1.0"}
        },
        "components": [
            {"type": "library", "bom-ref": "lib", "name": "lib", "version": "2.0"}
        ],
        "dependencies": [
            {"ref": "app", "dependsOn": ["lib"]},
            {"ref": "lib"}
        ],
        "compositions": [{"aggregate": "complete"}]
    }"#;

    #[test]
    fn test_parse_minimal_document() {
        let doc: Document = serde_json::from_str(MINIMAL).expect("valid document");
        assert_eq!(doc.spec_version, "1.5");
        assert_eq!(doc.component_count(), 1);
        assert_eq!(doc.dependency_count(), 2);
        assert_eq!(doc.tools().len(), 1);
        assert_eq!(doc.root_component().map(|c| c.name.as_str()), Some("app"));
        assert_eq!(
            doc.find_dependency("app").map(|d| d.depends_on.len()),
            Some(1)
        );
        assert!(doc.extra.contains_key("compositions"));
    }

    #[test]
    fn test_empty_document_defaults() {
        let doc: Document = serde_json::from_str("{}").expect("lenient");
        assert_eq!(doc.bom_format, "CycloneDX");
        assert_eq!(doc.spec_version, DEFAULT_SPEC_VERSION);
        assert!(doc.tools().is_empty());
        assert!(doc.root_component().is_none());
    }

    #[test]
    fn test_content_hash_tracks_order() {
        let mut doc = Document::default();
        doc.components.push(Component::new("a"));
        doc.components.push(Component::new("b"));
        let first = doc.content_hash();
        assert_eq!(first, doc.clone().content_hash());

        doc.components.reverse();
        assert_ne!(first, doc.content_hash());
    }
}
