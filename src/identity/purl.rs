//! Package-URL based identity.

use super::{ComponentIdentity, IdentityError, NameGroupVersion};
use crate::model::Component;
use packageurl::PackageUrl;
use std::str::FromStr;

/// Identity by Package URL, falling back to name/group/version.
///
/// When both components carry a purl, the purls are parsed and compared on
/// type (case-insensitive), namespace, name and version; qualifiers and
/// subpath are ignored. A purl that does not parse is an error rather than a
/// silent mismatch. When either side has no purl the comparison falls back
/// to [`NameGroupVersion`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PurlIdentity {
    fallback: NameGroupVersion,
}

impl PurlIdentity {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fallback: NameGroupVersion,
        }
    }
}

/// The parts of a purl that participate in identity
#[derive(Debug, PartialEq, Eq)]
struct PurlKey {
    ty: String,
    namespace: Option<String>,
    name: String,
    version: Option<String>,
}

fn purl_key(purl: &str) -> Result<PurlKey, IdentityError> {
    let parsed = PackageUrl::from_str(purl).map_err(|e| IdentityError::MalformedPurl {
        purl: purl.to_string(),
        reason: e.to_string(),
    })?;

    Ok(PurlKey {
        ty: parsed.ty().to_lowercase(),
        namespace: parsed.namespace().map(str::to_string),
        name: parsed.name().to_string(),
        version: parsed.version().map(str::to_string),
    })
}

impl ComponentIdentity for PurlIdentity {
    fn equals(&self, a: &Component, b: &Component) -> Result<bool, IdentityError> {
        match (a.purl.as_deref(), b.purl.as_deref()) {
            (Some(left), Some(right)) => {
                if left == right {
                    // Still reject garbage even when it is byte-identical.
                    purl_key(left)?;
                    return Ok(true);
                }
                Ok(purl_key(left)? == purl_key(right)?)
            }
            _ => self.fallback.equals(a, b),
        }
    }

    fn name(&self) -> &str {
        "purl"
    }
}
