//! SBOM format parsers.
//!
//! Parsers turn raw CycloneDX content into the [`Document`] model. Format
//! routing between JSON and XML uses a confidence score from
//! [`DocumentParser::detect`], so content that merely looks like JSON is not
//! mistaken for an SBOM.
//!
//! ## Usage
//!
//! ```no_run
//! use sbom_combiner::parsers::{parse_document_str, detect_format};
//!
//! let content = std::fs::read_to_string("bom.json").unwrap();
//! if let Some(detection) = detect_format(&content) {
//!     println!("Detected CycloneDX {:?} ({:?})", detection.variant, detection.version);
//! }
//! let document = parse_document_str(&content).unwrap();
//! println!("{} components", document.component_count());
//! ```

mod cyclonedx;
mod traits;

pub use cyclonedx::CycloneDxParser;
pub use traits::{DocumentParser, FormatConfidence, FormatDetection, FormatVariant, ParseError};

use crate::model::Document;

/// Detect the CycloneDX variant of some content without parsing it.
///
/// Returns `None` when the content is not recognizable as CycloneDX.
#[must_use]
pub fn detect_format(content: &str) -> Option<FormatDetection> {
    let detection = CycloneDxParser::new().detect(content);
    detection.confidence.can_parse().then_some(detection)
}

/// Parse a CycloneDX document from string content
pub fn parse_document_str(content: &str) -> Result<Document, ParseError> {
    CycloneDxParser::new().parse_str(content)
}
