//! Unified error types for dialogpack.
//!
//! This module provides a single [`DialogpackError`] enum that covers every
//! failure the library can report. Recoverable anomalies (lines without a
//! sender, transcripts that produce zero records) are not errors at all; they
//! only show up in diagnostics and counts.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for dialogpack operations.
///
/// # Example
///
/// ```rust
/// use dialogpack::error::Result;
/// use dialogpack::Turn;
///
/// fn load() -> Result<Vec<Turn>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, DialogpackError>;

/// The error type for all dialogpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DialogpackError {
    /// An I/O error occurred while reading a transcript or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A structured transcript could not be parsed.
    ///
    /// Raised when the file is not valid JSON, is not a top-level array, or
    /// contains an element that is not a single-key `{sender: message}`
    /// mapping. The run for that file is aborted and no output is written.
    #[error("Malformed structured transcript{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    MalformedInput {
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A sender or prefix pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as configured
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The configuration is structurally valid but semantically unusable.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },

    /// An output path resolves to one of the input files.
    #[error("Refusing to overwrite input file {}; choose another --output", path.display())]
    OutputIsInput {
        /// The conflicting path
        path: PathBuf,
    },

    /// An output path was already claimed by an earlier input of the same run.
    #[error("Output {} is already written for {}", path.display(), first.display())]
    DuplicateOutput {
        /// The contested output path
        path: PathBuf,
        /// The input that claimed it first
        first: PathBuf,
    },

    /// The configuration file is not valid TOML for [`PipelineConfig`](crate::config::PipelineConfig).
    #[error("Config file error: {0}")]
    Config(#[from] toml::de::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error on the output side.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when an in-memory writer produces bytes that are not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for DialogpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DialogpackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl DialogpackError {
    /// Creates a malformed-input error for a structured transcript.
    pub fn malformed(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        DialogpackError::MalformedInput { source, path }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        DialogpackError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        DialogpackError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates an error for an output that would overwrite an input.
    pub fn output_is_input(path: &Path) -> Self {
        DialogpackError::OutputIsInput {
            path: path.to_path_buf(),
        }
    }

    /// Creates an error for an output path two inputs map to.
    pub fn duplicate_output(path: &Path, first: &Path) -> Self {
        DialogpackError::DuplicateOutput {
            path: path.to_path_buf(),
            first: first.to_path_buf(),
        }
    }

    /// Attaches a file path to a malformed-input error that has none yet.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, file: &Path) -> Self {
        match self {
            DialogpackError::MalformedInput { source, path: None } => {
                DialogpackError::MalformedInput {
                    source,
                    path: Some(file.to_path_buf()),
                }
            }
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, DialogpackError::Io(_))
    }

    /// Returns `true` if this is a malformed-input error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, DialogpackError::MalformedInput { .. })
    }

    /// Returns `true` if an output path clashes with an input or another output.
    pub fn is_output_conflict(&self) -> bool {
        matches!(
            self,
            DialogpackError::OutputIsInput { .. } | DialogpackError::DuplicateOutput { .. }
        )
    }

    /// Returns `true` if this is a configuration problem (pattern, value or file).
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            DialogpackError::InvalidPattern { .. }
                | DialogpackError::InvalidConfig { .. }
                | DialogpackError::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("[{").unwrap_err()
    }

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = DialogpackError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
        assert!(err.is_io());
    }

    #[test]
    fn test_malformed_with_path() {
        let err = DialogpackError::malformed(json_error(), Some(PathBuf::from("/tmp/chat.json")));
        let display = err.to_string();
        assert!(display.contains("Malformed structured transcript"));
        assert!(display.contains("/tmp/chat.json"));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_malformed_without_path() {
        let err = DialogpackError::malformed(json_error(), None);
        assert!(!err.to_string().contains("file:"));
    }

    #[test]
    fn test_with_path_fills_missing_path() {
        let err = DialogpackError::malformed(json_error(), None).with_path(Path::new("a.json"));
        match err {
            DialogpackError::MalformedInput { path, .. } => {
                assert_eq!(path, Some(PathBuf::from("a.json")));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_with_path_keeps_existing_path() {
        let err = DialogpackError::malformed(json_error(), Some(PathBuf::from("first.json")))
            .with_path(Path::new("second.json"));
        assert!(err.to_string().contains("first.json"));
    }

    #[test]
    fn test_with_path_ignores_other_variants() {
        let err = DialogpackError::invalid_config("window_size must be at least 1")
            .with_path(Path::new("x.json"));
        assert!(!err.to_string().contains("x.json"));
        assert!(err.is_config());
    }

    #[test]
    fn test_invalid_pattern_display() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = DialogpackError::invalid_pattern("(", source);
        assert!(err.to_string().contains("Invalid pattern '('"));
        assert!(err.is_config());
    }

    #[test]
    fn test_output_conflict_display() {
        let err = DialogpackError::output_is_input(Path::new("a.json"));
        assert!(err.to_string().contains("Refusing to overwrite input file a.json"));
        assert!(err.is_output_conflict());

        let err = DialogpackError::duplicate_output(Path::new("out/chat.csv"), Path::new("x/chat.json"));
        let display = err.to_string();
        assert!(display.contains("out/chat.csv"));
        assert!(display.contains("x/chat.json"));
        assert!(err.is_output_conflict());
        assert!(!err.is_config());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = DialogpackError::malformed(json_error(), None);
        assert!(err.source().is_some());
    }
}
