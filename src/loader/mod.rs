//! Document loading.
//!
//! Resolves each [`DocumentSource`] into a parsed [`Document`] and maps
//! failures onto the load variants of [`SbomCombinerError`]:
//!
//! - a path with nothing behind it is `NotFound`;
//! - a path that exists but cannot be read (directories included) is `Unreadable`;
//! - content that fails to open or parse is `LoadFailed`.
//!
//! Files and streams share one size limit. Streams are read at most one byte
//! past it, so an oversized upload is rejected without buffering all of it.

mod source;

pub use source::{BytesSource, DocumentSource, ReaderSource, StreamSource};

use crate::error::{LoadErrorKind, Result, SbomCombinerError};
use crate::model::Document;
use crate::parsers::{CycloneDxParser, DocumentParser, ParseError};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Maximum SBOM file size (512 MB)
pub const MAX_SBOM_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Turns document sources into parsed documents
pub struct DocumentLoader {
    parser: Box<dyn DocumentParser>,
    max_size: u64,
}

impl DocumentLoader {
    /// Create a loader using the CycloneDX parser
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: Box::new(CycloneDxParser::new()),
            max_size: MAX_SBOM_FILE_SIZE,
        }
    }

    /// Create a loader that delegates to a custom parser
    #[must_use]
    pub fn with_parser(parser: impl DocumentParser + 'static) -> Self {
        Self {
            parser: Box::new(parser),
            max_size: MAX_SBOM_FILE_SIZE,
        }
    }

    /// Override the size limit applied to files and streams
    #[must_use]
    pub const fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Resolve one source into a document
    pub fn load(&self, source: DocumentSource) -> Result<Document> {
        match source {
            DocumentSource::Path(path) => self.load_path(&path),
            DocumentSource::Stream(mut stream) => self.load_stream(stream.as_mut()),
            DocumentSource::Parsed(document) => Ok(*document),
        }
    }

    /// Resolve every source in order, stopping at the first failure
    pub fn load_all(&self, sources: Vec<DocumentSource>) -> Result<Vec<Document>> {
        sources.into_iter().map(|source| self.load(source)).collect()
    }

    /// Load a document from a file path
    pub fn load_path(&self, path: &Path) -> Result<Document> {
        if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
            return Err(SbomCombinerError::not_found(path));
        }

        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SbomCombinerError::not_found(path));
            }
            Err(e) => return Err(SbomCombinerError::unreadable(path, Some(e))),
        };
        if metadata.is_dir() {
            return Err(SbomCombinerError::unreadable(path, None));
        }
        if metadata.len() > self.max_size {
            return Err(SbomCombinerError::load_failed(
                path.display().to_string(),
                self.too_large(),
            ));
        }

        let bytes = {
            let mut file =
                File::open(path).map_err(|e| SbomCombinerError::unreadable(path, Some(e)))?;
            let mut bytes = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
            file.read_to_end(&mut bytes)
                .map_err(|e| SbomCombinerError::unreadable(path, Some(e)))?;
            bytes
        };

        let document = self
            .parser
            .parse_bytes(&bytes)
            .map_err(|e| SbomCombinerError::load_failed(path.display().to_string(), e))?;

        tracing::info!(
            "Loaded {} from {}: {} components, {} dependencies",
            self.parser.format_name(),
            path.display(),
            document.component_count(),
            document.dependency_count()
        );
        Ok(document)
    }

    /// Load a document from a stream
    pub fn load_stream(&self, stream: &mut dyn StreamSource) -> Result<Document> {
        let name = stream.name().to_string();
        let parsed = match stream.open() {
            Ok(reader) => self
                .read_bounded(reader)
                .and_then(|bytes| self.parser.parse_bytes(&bytes))
                .map_err(LoadErrorKind::from),
            Err(e) => Err(LoadErrorKind::Open(e)),
        };

        match parsed {
            Ok(document) => {
                tracing::info!(
                    "Loaded {} from stream {}: {} components, {} dependencies",
                    self.parser.format_name(),
                    name,
                    document.component_count(),
                    document.dependency_count()
                );
                Ok(document)
            }
            Err(kind) => {
                tracing::error!("Failed to read bom file {}: {}", name, kind);
                Err(SbomCombinerError::load_failed(name, kind))
            }
        }
    }
}

impl DocumentLoader {
    /// Read a stream to the end, failing once it grows past the size limit
    fn read_bounded(&self, reader: impl Read) -> std::result::Result<Vec<u8>, ParseError> {
        let mut bytes = Vec::new();
        reader
            .take(self.max_size.saturating_add(1))
            .read_to_end(&mut bytes)?;
        if bytes.len() as u64 > self.max_size {
            return Err(self.too_large());
        }
        Ok(bytes)
    }

    fn too_large(&self) -> ParseError {
        ParseError::IoError(format!(
            "SBOM exceeds the {} byte size limit",
            self.max_size
        ))
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DocumentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentLoader")
            .field("parser", &self.parser.format_name())
            .field("max_size", &self.max_size)
            .finish()
    }
}
