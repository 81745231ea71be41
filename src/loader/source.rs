//! Input descriptors for documents to be loaded.

use crate::model::Document;
use std::fmt;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// A named byte stream that yields one SBOM document when read.
///
/// `open` is called at most once per load, and the returned reader is dropped
/// before the loader moves on to the next source.
pub trait StreamSource: Send {
    /// Name used in log lines and error messages
    fn name(&self) -> &str;

    /// Open the stream for reading
    fn open(&mut self) -> io::Result<Box<dyn Read + '_>>;
}

/// An in-memory document buffer
#[derive(Debug, Clone)]
pub struct BytesSource {
    name: String,
    bytes: Vec<u8>,
}

impl BytesSource {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl StreamSource for BytesSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.bytes.as_slice())))
    }
}

/// Wraps an arbitrary reader. It can be opened only once.
pub struct ReaderSource {
    name: String,
    reader: Option<Box<dyn Read + Send>>,
}

impl ReaderSource {
    #[must_use]
    pub fn new(name: impl Into<String>, reader: impl Read + Send + 'static) -> Self {
        Self {
            name: name.into(),
            reader: Some(Box::new(reader)),
        }
    }
}

impl fmt::Debug for ReaderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderSource")
            .field("name", &self.name)
            .field("consumed", &self.reader.is_none())
            .finish()
    }
}

impl StreamSource for ReaderSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> io::Result<Box<dyn Read + '_>> {
        match self.reader.take() {
            Some(reader) => Ok(reader),
            None => Err(io::Error::other(format!(
                "stream '{}' has already been consumed",
                self.name
            ))),
        }
    }
}

/// One entry in the list of documents to combine
pub enum DocumentSource {
    /// A file on disk
    Path(PathBuf),
    /// A byte stream
    Stream(Box<dyn StreamSource>),
    /// An already parsed document
    Parsed(Box<Document>),
}

impl DocumentSource {
    /// Wrap a stream source
    pub fn stream(source: impl StreamSource + 'static) -> Self {
        Self::Stream(Box::new(source))
    }

    /// Short description for logs
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Stream(stream) => stream.name().to_string(),
            Self::Parsed(_) => "<parsed document>".to_string(),
        }
    }
}

impl fmt::Debug for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Stream(stream) => f.debug_tuple("Stream").field(&stream.name()).finish(),
            Self::Parsed(doc) => f
                .debug_tuple("Parsed")
                .field(&doc.component_count())
                .finish(),
        }
    }
}

impl From<PathBuf> for DocumentSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for DocumentSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for DocumentSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<Document> for DocumentSource {
    fn from(document: Document) -> Self {
        Self::Parsed(Box::new(document))
    }
}

impl From<Box<dyn StreamSource>> for DocumentSource {
    fn from(stream: Box<dyn StreamSource>) -> Self {
        Self::Stream(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_source_reopens() {
        let mut source = BytesSource::new("mem", b"abc".to_vec());
        for _ in 0..2 {
            let mut out = String::new();
            source
                .open()
                .expect("open")
                .read_to_string(&mut out)
                .expect("read");
            assert_eq!(out, "abc");
        }
    }

    #[test]
    fn test_reader_source_is_one_shot() {
        let mut source = ReaderSource::new("pipe", Cursor::new(b"abc".to_vec()));
        assert!(source.open().is_ok());
        let err = source.open().err().expect("second open fails");
        assert!(err.to_string().contains("pipe"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(DocumentSource::from("a/bom.json").describe(), "a/bom.json");
        assert_eq!(
            DocumentSource::stream(BytesSource::new("upload-1", Vec::new())).describe(),
            "upload-1"
        );
        assert_eq!(
            DocumentSource::from(Document::default()).describe(),
            "<parsed document>"
        );
    }
}
