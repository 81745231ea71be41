//! Parser trait definitions and error types.
//!
//! This module defines the `DocumentParser` trait the loader delegates to,
//! and the confidence-scored format detection parsers use to route content.

use crate::model::Document;
use thiserror::Error;

/// Errors that can occur during SBOM parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("XML parse error: {0}")]
    XmlError(String),

    #[error("Unknown SBOM format: {0}")]
    UnknownFormat(String),
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

/// Confidence level for format detection
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FormatConfidence(f32);

impl FormatConfidence {
    /// No confidence - definitely not this format
    pub const NONE: Self = Self(0.0);
    /// Low confidence - might be this format
    pub const LOW: Self = Self(0.25);
    /// Medium confidence - likely this format
    pub const MEDIUM: Self = Self(0.5);
    /// High confidence - almost certainly this format
    pub const HIGH: Self = Self(0.75);
    /// Certain - definitely this format
    pub const CERTAIN: Self = Self(1.0);

    /// Get the confidence value
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Check if this confidence indicates the format can be parsed
    #[must_use]
    pub fn can_parse(&self) -> bool {
        self.0 >= Self::LOW.0
    }
}

impl Default for FormatConfidence {
    fn default() -> Self {
        Self::NONE
    }
}

/// Serialization variant of a detected document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVariant {
    Json,
    Xml,
}

impl std::fmt::Display for FormatVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Xml => write!(f, "XML"),
        }
    }
}

/// Detection result from a parser
#[derive(Debug, Clone)]
pub struct FormatDetection {
    /// Confidence that this parser can handle the content
    pub confidence: FormatConfidence,
    /// Detected serialization variant
    pub variant: Option<FormatVariant>,
    /// Detected spec version if applicable
    pub version: Option<String>,
    /// Any issues detected that might affect parsing
    pub warnings: Vec<String>,
}

impl FormatDetection {
    /// Create a detection result indicating no match
    #[must_use]
    pub const fn no_match() -> Self {
        Self {
            confidence: FormatConfidence::NONE,
            variant: None,
            version: None,
            warnings: Vec::new(),
        }
    }

    /// Create a detection result with confidence and variant
    #[must_use]
    pub const fn matched(confidence: FormatConfidence, variant: FormatVariant) -> Self {
        Self {
            confidence,
            variant: Some(variant),
            version: None,
            warnings: Vec::new(),
        }
    }

    /// Set the detected version
    #[must_use]
    pub fn version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Add a warning
    #[must_use]
    pub fn warning(mut self, warning: &str) -> Self {
        self.warnings.push(warning.to_string());
        self
    }
}

/// Turns raw SBOM content into a [`Document`].
///
/// Implementors provide `parse_str` and `detect`; byte input is shared
/// through `parse_bytes`.
pub trait DocumentParser: Send + Sync {
    /// Parse a document from string content
    fn parse_str(&self, content: &str) -> Result<Document, ParseError>;

    /// Get format name
    fn format_name(&self) -> &str;

    /// Lightweight structural check without a full parse
    fn detect(&self, content: &str) -> FormatDetection;

    /// Parse a document from raw bytes.
    ///
    /// A leading UTF-8 byte-order mark is ignored.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Document, ParseError> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| ParseError::IoError(format!("content is not valid UTF-8: {e}")))?;
        self.parse_str(content.strip_prefix('\u{feff}').unwrap_or(content))
    }
}
