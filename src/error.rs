//! Unified error types for sbom-combiner.
//!
//! Loading and merging share one error type so callers of the combine entry
//! points only have to match a single enum. The `Display` text of the load
//! variants is relied on by downstream tooling (substring matches on
//! `does NOT exist!` and `Failed to read bom file!`), so it is kept stable.

use crate::identity::IdentityError;
use crate::parsers::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-combiner operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SbomCombinerError {
    /// Nothing exists at the requested path
    #[error("File({}) does NOT exist!", .path.display())]
    NotFound { path: PathBuf },

    /// The path exists but could not be opened for reading
    #[error("Unable to read SBom from file({}).", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A stream (or file) was opened but could not be turned into a document
    #[error("Failed to read bom file! ({name}): {source}")]
    LoadFailed {
        name: String,
        #[source]
        source: LoadErrorKind,
    },

    /// A step of the merge itself failed
    #[error("Failed to merge SBOMs: {context}")]
    MergeFailed {
        context: String,
        #[source]
        source: MergeErrorKind,
    },

    /// The combined document could not be serialized or written
    #[error("Failed to write combined SBOM: {context}")]
    Output {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors outside of document loading
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Underlying cause of a [`SbomCombinerError::LoadFailed`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("could not open stream: {0}")]
    Open(#[source] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Underlying cause of a [`SbomCombinerError::MergeFailed`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MergeErrorKind {
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// Convenient Result type for sbom-combiner operations
pub type Result<T> = std::result::Result<T, SbomCombinerError>;

impl SbomCombinerError {
    /// Create a not-found error for a path
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an unreadable error, optionally keeping the IO cause
    pub fn unreadable(path: impl Into<PathBuf>, source: Option<std::io::Error>) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// Create a load error for a named source
    pub fn load_failed(name: impl Into<String>, source: impl Into<LoadErrorKind>) -> Self {
        Self::LoadFailed {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a merge error with context
    pub fn merge_failed(context: impl Into<String>, source: impl Into<MergeErrorKind>) -> Self {
        Self::MergeFailed {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Create an output error
    pub fn output(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Output {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error came from resolving an input document
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Unreadable { .. } | Self::LoadFailed { .. }
        )
    }
}

impl From<std::io::Error> for SbomCombinerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is prepended to the existing context of merge errors and to the
/// message of IO and config errors. Load errors keep their message untouched
/// because their wording is matched on by callers.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SbomCombinerError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: SbomCombinerError, new_ctx: &str) -> SbomCombinerError {
    match err {
        SbomCombinerError::MergeFailed {
            context: existing,
            source,
        } => SbomCombinerError::MergeFailed {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SbomCombinerError::Output {
            context: existing,
            source,
        } => SbomCombinerError::Output {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SbomCombinerError::Io {
            path,
            message,
            source,
        } => SbomCombinerError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SbomCombinerError::Config(msg) => SbomCombinerError::Config(chain_context(new_ctx, &msg)),
        other => other,
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_file() {
        let err = SbomCombinerError::not_found("./sboms/somebogusFile.xml");
        let display = err.to_string();
        assert!(
            display.contains("somebogusFile.xml) does NOT exist!"),
            "unexpected message: {display}"
        );
        assert!(err.is_load_error());
    }

    #[test]
    fn test_unreadable_message() {
        let err = SbomCombinerError::unreadable("/tmp/locked.json", None);
        assert_eq!(
            err.to_string(),
            "Unable to read SBom from file(/tmp/locked.json)."
        );
    }

    #[test]
    fn test_load_failed_has_fixed_prefix() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err = SbomCombinerError::load_failed("upload.xml", LoadErrorKind::Open(io_err));
        let display = err.to_string();
        assert!(display.starts_with("Failed to read bom file!"), "{display}");
        assert!(display.contains("upload.xml"));
    }

    #[test]
    fn test_merge_failed_context_chaining() {
        fn inner() -> Result<()> {
            Err(SbomCombinerError::merge_failed(
                "comparing components",
                IdentityError::MalformedPurl {
                    purl: "pkg:".to_string(),
                    reason: "empty".to_string(),
                },
            ))
        }

        match inner().context("document 2") {
            Err(SbomCombinerError::MergeFailed { context, .. }) => {
                assert_eq!(context, "document 2: comparing components");
            }
            other => panic!("Expected MergeFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_context_leaves_load_errors_alone() {
        let result: Result<()> = Err(SbomCombinerError::not_found("a.json"));
        let err = result.context("loading inputs").unwrap_err();
        assert_eq!(err.to_string(), "File(a.json) does NOT exist!");
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;
        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(SbomCombinerError::config("bad"));
        let err = err_result
            .with_context(|| {
                called = true;
                "outer"
            })
            .unwrap_err();
        assert!(called);
        assert_eq!(err.to_string(), "Invalid configuration: outer: bad");
    }

    #[test]
    fn test_output_error_is_not_a_merge_error() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SbomCombinerError::output("writing combined document", cause);
        assert!(!err.is_load_error());
        assert!(err
            .to_string()
            .starts_with("Failed to write combined SBOM: writing combined document"));

        let result: Result<()> = Err(err);
        match result.context("stdout") {
            Err(SbomCombinerError::Output { context, .. }) => {
                assert_eq!(context, "stdout: writing combined document");
            }
            other => panic!("Expected Output, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("outer", "middle: inner"), "outer: middle: inner");
    }
}
