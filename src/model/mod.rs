//! In-memory SBOM document model.
//!
//! The structures here follow the `CycloneDX` object model closely and derive
//! `serde` with `CycloneDX` JSON field names, so a parsed document can be
//! written back out as-is. Fields the combiner does not interpret are kept as
//! opaque JSON in the `extra` maps and passed through untouched.
//!
//! # Identity
//!
//! Nothing in this module decides when two components are "the same". That is
//! the job of a [`crate::identity::ComponentIdentity`] implementation injected
//! into the merge engine.

mod component;
mod dependency;
mod metadata;
mod sbom;

pub use component::*;
pub use dependency::*;
pub use metadata::*;
pub use sbom::*;
