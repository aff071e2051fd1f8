//! Structured transcript parser.
//!
//! Input is a JSON array where every element maps exactly one sender to a
//! message string:
//!
//! ```json
//! [{"Alice": "hi how are you"}, {"Bob": "good thanks"}]
//! ```
//!
//! Anything else (invalid JSON, a non-array top level, an element with zero
//! or several keys) is reported as
//! [`MalformedInput`](crate::DialogpackError::MalformedInput).

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::Turn;
use crate::core::merge_turns;
use crate::error::{DialogpackError, Result};
use crate::parser::{SourceKind, Transcript, TranscriptParser};

/// Parser for structured JSON transcripts.
///
/// Records are used as turns directly unless merging is enabled.
#[derive(Debug, Clone, Default)]
pub struct StructuredTranscriptParser {
    merge: bool,
}

impl StructuredTranscriptParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges consecutive records from the same sender when enabled.
    #[must_use]
    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    /// Parses raw bytes; invalid UTF-8 is malformed input like any other JSON error.
    pub fn parse_slice(&self, content: &[u8]) -> Result<Transcript> {
        let records: Vec<Turn> =
            serde_json::from_slice(content).map_err(|e| DialogpackError::malformed(e, None))?;
        Ok(self.build_transcript(records))
    }

    fn build_transcript(&self, records: Vec<Turn>) -> Transcript {
        let input_messages = records.len();

        let turns = if self.merge {
            merge_turns(records)
        } else {
            records
        };

        debug!(
            messages = input_messages,
            turns = turns.len(),
            merged = self.merge,
            "parsed structured transcript"
        );

        Transcript::new(turns, input_messages)
    }
}

impl TranscriptParser for StructuredTranscriptParser {
    fn name(&self) -> &'static str {
        "Structured transcript"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Structured
    }

    fn parse_str(&self, content: &str) -> Result<Transcript> {
        self.parse_slice(content.as_bytes())
    }

    fn parse(&self, path: &Path) -> Result<Transcript> {
        let content = fs::read(path)?;
        self.parse_slice(&content).map_err(|e| e.with_path(path))
    }
}
