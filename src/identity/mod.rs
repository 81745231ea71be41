//! Component identity policies.
//!
//! [`NameGroupVersion`] is the default and treats two components as the same
//! when their name, group and version are all equal. [`PurlIdentity`] prefers
//! Package URLs when both sides have one.
//!
//! ```
//! use sbom_combiner::identity::{ComponentIdentity, NameGroupVersion};
//! use sbom_combiner::model::Component;
//!
//! let a = Component::new("guava").with_group("com.google.guava").with_version("32.1.2-jre");
//! let mut b = a.clone();
//! b.description = Some("Google core libraries".to_string());
//! assert!(NameGroupVersion.equals(&a, &b).unwrap());
//! ```

mod purl;
mod traits;

pub use purl::PurlIdentity;
pub use traits::{ComponentIdentity, IdentityError};

use crate::model::Component;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity by exact (name, group, version).
///
/// Every other field, including external references, licenses and purl, is
/// ignored. An absent group or version only equals another absent one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameGroupVersion;

impl ComponentIdentity for NameGroupVersion {
    fn equals(&self, a: &Component, b: &Component) -> Result<bool, IdentityError> {
        Ok(a.name == b.name && a.group == b.group && a.version == b.version)
    }

    fn name(&self) -> &str {
        "name-group-version"
    }
}

/// Selectable identity policy
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityStrategy {
    /// Exact name, group and version
    #[default]
    NameGroupVersion,
    /// Package URL when both sides have one, else name/group/version
    Purl,
}

impl IdentityStrategy {
    /// Build the comparator for this strategy
    #[must_use]
    pub fn build(self) -> Box<dyn ComponentIdentity> {
        match self {
            Self::NameGroupVersion => Box::new(NameGroupVersion),
            Self::Purl => Box::new(PurlIdentity::new()),
        }
    }
}

impl std::fmt::Display for IdentityStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameGroupVersion => write!(f, "name-group-version"),
            Self::Purl => write!(f, "purl"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExternalRefType, ExternalReference};

    #[test]
    fn test_ngv_ignores_everything_else() {
        let a = Component::new("commons-io")
            .with_group("commons-io")
            .with_version("2.11.0")
            .with_external_reference(ExternalReference::new(
                ExternalRefType::Website,
                "https://commons.apache.org/io",
            ));
        let b = Component::new("commons-io")
            .with_group("commons-io")
            .with_version("2.11.0")
            .with_purl("pkg:maven/commons-io/commons-io@2.11.0");
        assert_eq!(NameGroupVersion.equals(&a, &b), Ok(true));
    }

    #[test]
    fn test_ngv_absent_group_only_matches_absent() {
        let a = Component::new("commons-io").with_version("2.11.0");
        let b = Component::new("commons-io")
            .with_group("commons-io")
            .with_version("2.11.0");
        assert_eq!(NameGroupVersion.equals(&a, &b), Ok(false));
        assert_eq!(NameGroupVersion.equals(&a, &a.clone()), Ok(true));
    }

    #[test]
    fn test_ngv_version_difference() {
        let a = Component::new("x").with_version("1");
        let b = Component::new("x").with_version("2");
        assert_eq!(NameGroupVersion.equals(&a, &b), Ok(false));
    }

    #[test]
    fn test_contains_default_method() {
        let existing = vec![Component::new("a"), Component::new("b")];
        assert_eq!(NameGroupVersion.contains(&existing, &Component::new("b")), Ok(true));
        assert_eq!(NameGroupVersion.contains(&existing, &Component::new("c")), Ok(false));
        assert_eq!(NameGroupVersion.contains(&[], &Component::new("a")), Ok(false));
    }

    #[test]
    fn test_strategy_build_names() {
        assert_eq!(IdentityStrategy::NameGroupVersion.build().name(), "name-group-version");
        assert_eq!(IdentityStrategy::Purl.build().name(), "purl");
        assert_eq!(IdentityStrategy::Purl.to_string(), "purl");
    }
}
