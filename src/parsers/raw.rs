//! Raw transcript parser.
//!
//! Reads export text, drops notice and marker-less lines, and merges
//! consecutive messages from the same sender into turns.

use tracing::debug;

use crate::config::ParserConfig;
use crate::core::{LineParser, merge_turns, transcript_lines};
use crate::error::Result;
use crate::parser::{SourceKind, Transcript, TranscriptParser};

/// Parser for raw line-oriented transcripts.
///
/// # Example
///
/// ```rust
/// use dialogpack::parsers::RawTranscriptParser;
/// use dialogpack::parser::TranscriptParser;
/// use dialogpack::Turn;
///
/// let parser = RawTranscriptParser::new();
/// let transcript = parser.parse_str(
///     "1/1/24, 10:00 - Alice: hi\n1/1/24, 10:01 - Alice: how are you\n1/1/24, 10:02 - Bob: good thanks",
/// )?;
///
/// assert_eq!(transcript.input_messages, 3);
/// assert_eq!(
///     transcript.turns,
///     vec![Turn::new("Alice", "hi how are you"), Turn::new("Bob", "good thanks")]
/// );
/// # Ok::<(), dialogpack::DialogpackError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawTranscriptParser {
    lines: LineParser,
}

impl RawTranscriptParser {
    /// Creates a parser with default notices and patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom notices and patterns.
    pub fn with_config(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            lines: LineParser::with_config(config)?,
        })
    }
}

impl TranscriptParser for RawTranscriptParser {
    fn name(&self) -> &'static str {
        "Raw transcript"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Raw
    }

    fn parse_str(&self, content: &str) -> Result<Transcript> {
        let mut lines = 0usize;
        let mut input_messages = 0usize;

        let entries = self
            .lines
            .parse_lines(transcript_lines(content).inspect(|_| lines += 1))
            .inspect(|_| input_messages += 1);
        let turns = merge_turns(entries);

        debug!(
            lines,
            messages = input_messages,
            dropped = lines - input_messages,
            turns = turns.len(),
            "parsed raw transcript"
        );

        Ok(Transcript::new(turns, input_messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Turn;

    #[test]
    fn test_parse_str_merges() {
        let content = "1/1/24, 10:00 - Alice: hi\n\
                       1/1/24, 10:01 - Alice: how are you\n\
                       1/1/24, 10:02 - Bob: good thanks";
        let transcript = RawTranscriptParser::new().parse_str(content).unwrap();
        assert_eq!(
            transcript.turns,
            vec![Turn::new("Alice", "hi how are you"), Turn::new("Bob", "good thanks")]
        );
    }

    #[test]
    fn test_notice_does_not_break_adjacency() {
        let content = "1/1/24, 10:00 - Alice: hi\n\
                       1/1/24, 10:00 - Messages and calls are end-to-end encrypted. Tap to learn more.\n\
                       1/1/24, 10:01 - Alice: again";
        let transcript = RawTranscriptParser::new().parse_str(content).unwrap();
        assert_eq!(transcript.turns, vec![Turn::new("Alice", "hi again")]);
        assert_eq!(transcript.input_messages, 2);
    }

    #[test]
    fn test_system_and_continuation_lines_dropped() {
        let content = "1/1/24, 09:59 - Alice created group \"Trip\"\n\
                       1/1/24, 10:00 - Alice: first line\n\
                       second line without marker\n\
                       \n\
                       1/1/24, 10:01 - Bob: ok";
        let transcript = RawTranscriptParser::new().parse_str(content).unwrap();
        assert_eq!(
            transcript.turns,
            vec![Turn::new("Alice", "first line"), Turn::new("Bob", "ok")]
        );
    }

    #[test]
    fn test_empty_content() {
        let transcript = RawTranscriptParser::new().parse_str("").unwrap();
        assert!(transcript.is_empty());
        assert_eq!(transcript.input_messages, 0);
    }

    #[test]
    fn test_crlf_lines() {
        let content = "1/1/24, 10:00 - Alice: hi\r\n1/1/24, 10:01 - Bob: hey\r\n";
        let transcript = RawTranscriptParser::new().parse_str(content).unwrap();
        assert_eq!(transcript.turns[1], Turn::new("Bob", "hey"));
    }
}
