//! Dependency graph nodes.

use serde::{Deserialize, Serialize};

/// A dependency node: one ref and the refs it depends on.
///
/// Nodes are identified by `bom_ref` alone. Two nodes with the same ref
/// describe the same vertex and their `depends_on` lists are unioned when
/// documents are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    #[serde(rename = "ref")]
    pub bom_ref: String,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl Dependency {
    /// Create a node with no outgoing edges
    #[must_use]
    pub fn new(bom_ref: impl Into<String>) -> Self {
        Self {
            bom_ref: bom_ref.into(),
            depends_on: Vec::new(),
        }
    }

    /// Add an outgoing edge
    #[must_use]
    pub fn depends_on(mut self, target: impl Into<String>) -> Self {
        self.depends_on.push(target.into());
        self
    }

    /// Whether both records describe the same node
    #[must_use]
    pub fn same_node(&self, other: &Self) -> bool {
        self.bom_ref == other.bom_ref
    }

    /// Append inner refs from another record of the same node.
    ///
    /// With `dedupe` unset every incoming ref is appended, repeats included.
    /// Returns how many refs were appended.
    pub fn absorb(&mut self, incoming: Vec<String>, dedupe: bool) -> usize {
        let mut appended = 0;
        for inner in incoming {
            if dedupe && self.depends_on.contains(&inner) {
                continue;
            }
            self.depends_on.push(inner);
            appended += 1;
        }
        appended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclonedx_json_shape() {
        let dep: Dependency =
            serde_json::from_str(r#"{"ref": "app", "dependsOn": ["lib-a", "lib-b"]}"#)
                .expect("valid dependency");
        assert_eq!(dep, Dependency::new("app").depends_on("lib-a").depends_on("lib-b"));

        let leaf: Dependency = serde_json::from_str(r#"{"ref": "lib-a"}"#).expect("valid leaf");
        assert!(leaf.depends_on.is_empty());
    }

    #[test]
    fn test_same_node_ignores_edges() {
        let a = Dependency::new("app").depends_on("x");
        let b = Dependency::new("app").depends_on("y");
        assert!(a.same_node(&b));
        assert!(!a.same_node(&Dependency::new("other")));
    }

    #[test]
    fn test_absorb_keeps_repeats_by_default() {
        let mut node = Dependency::new("app").depends_on("x");
        let appended = node.absorb(vec!["x".to_string(), "y".to_string()], false);
        assert_eq!(appended, 2);
        assert_eq!(node.depends_on, vec!["x", "x", "y"]);
    }

    #[test]
    fn test_absorb_dedupe() {
        let mut node = Dependency::new("app").depends_on("x");
        let appended = node.absorb(vec!["x".to_string(), "y".to_string()], true);
        assert_eq!(appended, 1);
        assert_eq!(node.depends_on, vec!["x", "y"]);
    }
}
