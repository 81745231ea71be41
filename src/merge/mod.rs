//! Merge engine.
//!
//! Folds an ordered sequence of documents into one combined document:
//!
//! 1. tools are unioned by structural equality, first occurrence wins;
//! 2. each document's root component is deferred to the end of the fold;
//! 3. components are unioned through a [`ComponentIdentity`], the first copy
//!    wins and untyped external references are given the `other` type;
//! 4. dependency nodes are unioned by ref, appending inner refs;
//! 5. deferred roots go through the same membership test as components.
//!
//! The fold is single-threaded and deterministic: the same input order always
//! yields the same output order.

mod accumulator;
mod engine;
mod stats;

pub use accumulator::MergeAccumulator;
pub use engine::MergeEngine;
pub use stats::MergeStats;

use crate::model::DEFAULT_SPEC_VERSION;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Options that shape the combined document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MergeOptions {
    /// `CycloneDX` spec version written on the combined document
    pub spec_version: String,
    /// Skip inner refs a dependency node already lists when unioning
    pub dedupe_inner_refs: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            spec_version: DEFAULT_SPEC_VERSION.to_string(),
            dedupe_inner_refs: false,
        }
    }
}
