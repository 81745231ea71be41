//! Merge statistics.

use serde::{Deserialize, Serialize};

/// Counters collected while folding documents together.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Number of documents folded into the accumulator
    pub documents: usize,
    /// Components encountered in component lists
    pub components_seen: usize,
    /// Components (roots included) appended to the output
    pub components_added: usize,
    /// Incoming components dropped because an equal one was already held
    pub components_discarded: usize,
    /// Root components set aside until the end of the fold
    pub roots_deferred: usize,
    /// Deferred roots that made it into the output
    pub roots_added: usize,
    /// Dependency nodes created for a new ref
    pub dependency_nodes_created: usize,
    /// Incoming dependency records folded into an existing node
    pub dependency_nodes_merged: usize,
    /// Inner refs appended to existing nodes
    pub inner_refs_appended: usize,
    /// External references that received the `other` type
    pub references_normalized: usize,
    /// Distinct tools in the output
    pub tools_kept: usize,
}

impl MergeStats {
    /// Create new empty stats
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log a summary of the merge
    pub fn log_summary(&self) {
        tracing::info!(
            "Merged {} documents: {} of {} components kept ({} duplicates), \
             {} dependency nodes ({} merged), {} tools",
            self.documents,
            self.components_added,
            self.components_seen + self.roots_deferred,
            self.components_discarded,
            self.dependency_nodes_created,
            self.dependency_nodes_merged,
            self.tools_kept
        );
        if self.references_normalized > 0 {
            tracing::debug!(
                "Assigned type 'other' to {} untyped external references",
                self.references_normalized
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_serialize_field_names() {
        let stats = MergeStats {
            documents: 2,
            tools_kept: 1,
            ..MergeStats::new()
        };
        let json = serde_json::to_value(&stats).expect("serialize");
        assert_eq!(json["documents"], 2);
        assert_eq!(json["tools_kept"], 1);
        assert_eq!(json["components_discarded"], 0);
    }
}
