//! Output format types for the dialogpack library.
//!
//! These types don't depend on CLI frameworks; the CLI has its own
//! `clap`-aware mirror in [`crate::cli`].
//!
//! # Example
//!
//! ```rust
//! use dialogpack::format::OutputFormat;
//!
//! let format = OutputFormat::from_path("dataset.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! assert!(format.writes_records());
//! # Ok::<(), dialogpack::DialogpackError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DialogpackError, Result};

/// Output format for a transcript run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// `Context`,`Reply` CSV of dialogue records (default).
    #[default]
    Csv,

    /// Pretty JSON array of merged `{sender: message}` turns, before windowing.
    Json,

    /// JSON Lines of dialogue records.
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Returns `true` if this format holds windowed records rather than turns.
    pub fn writes_records(&self) -> bool {
        !matches!(self, OutputFormat::Json)
    }

    /// Detects format from a file path based on extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        ext.parse()
            .map_err(|_| DialogpackError::invalid_config(format!(
                "Unknown output extension: '.{}'. Expected one of: csv, json, jsonl",
                ext
            )))
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}
