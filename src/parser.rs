//! Transcript parser trait and source kinds.
//!
//! A [`TranscriptParser`] turns one input file into a [`Transcript`]: the
//! ordered turns the window builder works on, plus how many input messages
//! they came from.
//!
//! # Example
//!
//! ```rust
//! use dialogpack::parser::{SourceKind, TranscriptParser, create_parser};
//! use dialogpack::config::PipelineConfig;
//!
//! let parser = create_parser(SourceKind::Structured, &PipelineConfig::default())?;
//! let transcript = parser.parse_str(r#"[{"A": "x"}, {"B": "y"}]"#)?;
//! assert_eq!(transcript.turns.len(), 2);
//! # Ok::<(), dialogpack::DialogpackError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Turn;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::parsers::{RawTranscriptParser, StructuredTranscriptParser};

/// The two supported input shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SourceKind {
    /// Line-oriented export text: `<preamble> - <sender>: <message>`.
    #[serde(alias = "txt", alias = "wa")]
    Raw,

    /// JSON array of single-key `{sender: message}` mappings.
    #[serde(alias = "json")]
    Structured,
}

impl SourceKind {
    /// Returns the usual file extension for this kind of input.
    pub fn default_extension(&self) -> &'static str {
        match self {
            SourceKind::Raw => "txt",
            SourceKind::Structured => "json",
        }
    }

    /// Returns all source names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &["raw", "txt", "wa", "structured", "json"]
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Raw => write!(f, "Raw transcript"),
            SourceKind::Structured => write!(f, "Structured transcript"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" | "txt" | "wa" => Ok(SourceKind::Raw),
            "structured" | "json" => Ok(SourceKind::Structured),
            _ => Err(format!(
                "Unknown source: '{}'. Expected one of: {}",
                s,
                SourceKind::all_names().join(", ")
            )),
        }
    }
}

/// Turns loaded from one input, ready for windowing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    /// Ordered turns. Merged for raw input.
    pub turns: Vec<Turn>,
    /// Number of input messages the turns were built from.
    pub input_messages: usize,
}

impl Transcript {
    pub fn new(turns: Vec<Turn>, input_messages: usize) -> Self {
        Self {
            turns,
            input_messages,
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Loads transcripts of one [`SourceKind`].
pub trait TranscriptParser: Send + Sync {
    /// Human-readable parser name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// The input shape this parser understands.
    fn kind(&self) -> SourceKind;

    /// Parses transcript content already in memory.
    fn parse_str(&self, content: &str) -> Result<Transcript>;

    /// Reads and parses a transcript file.
    ///
    /// Parse errors carry the file path.
    fn parse(&self, path: &Path) -> Result<Transcript> {
        let content = fs::read_to_string(path)?;
        self.parse_str(&content).map_err(|e| e.with_path(path))
    }
}

impl<T: TranscriptParser + ?Sized> TranscriptParser for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn kind(&self) -> SourceKind {
        (**self).kind()
    }

    fn parse_str(&self, content: &str) -> Result<Transcript> {
        (**self).parse_str(content)
    }

    fn parse(&self, path: &Path) -> Result<Transcript> {
        (**self).parse(path)
    }
}

/// Creates a boxed parser for the given source kind.
pub fn create_parser(kind: SourceKind, config: &PipelineConfig) -> Result<Box<dyn TranscriptParser>> {
    Ok(match kind {
        SourceKind::Raw => Box::new(RawTranscriptParser::with_config(&config.parser)?),
        SourceKind::Structured => {
            Box::new(StructuredTranscriptParser::new().with_merge(config.merge_structured))
        }
    })
}
