//! Trait definitions for component identity.
//!
//! The merge engine never decides on its own whether two components are the
//! same; it asks a [`ComponentIdentity`]. Swapping the implementation changes
//! the dedup policy without touching the fold.

use crate::model::Component;
use thiserror::Error;

/// Errors an identity comparison can report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("Malformed PURL: {purl} - {reason}")]
    MalformedPurl { purl: String, reason: String },

    #[error("Identity comparison failed: {0}")]
    Other(String),
}

/// Decides whether two components describe the same piece of software.
///
/// Implementations must be symmetric and must not depend on object identity.
/// An `Err` aborts the merge that asked the question.
pub trait ComponentIdentity: Send + Sync {
    /// Compare two components
    fn equals(&self, a: &Component, b: &Component) -> Result<bool, IdentityError>;

    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether `candidate` matches any entry of `existing`.
    ///
    /// Stops at the first match or the first error.
    fn contains(&self, existing: &[Component], candidate: &Component) -> Result<bool, IdentityError> {
        for component in existing {
            if self.equals(candidate, component)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
