//! Sender and message extraction for raw transcript lines.
//!
//! Raw exports put one message per line in the shape
//! `<preamble> - <sender>: <message>`, for example
//! `1/1/24, 10:00 - Alice: hi`. Lines without the marker (group events,
//! continuation lines of multi-line messages) are dropped, as are lines
//! containing a configured notice literal.
//!
//! Extraction is purely pattern-based: the line is split at the first ` - `
//! and the first `: ` after it, so a preamble or sender name containing either
//! sequence is split in the wrong place. This is a known limitation.

use std::borrow::Cow;

use regex::Regex;

use crate::config::ParserConfig;
use crate::error::{DialogpackError, Result};
use crate::turn::{ParsedEntry, Turn};

/// Parser for individual raw transcript lines.
///
/// # Example
///
/// ```rust
/// use dialogpack::core::LineParser;
/// use dialogpack::Turn;
///
/// let parser = LineParser::new();
/// let turns: Vec<Turn> = parser
///     .parse_lines(["1/1/24, 10:00 - Alice: hi", "Alice added Bob"])
///     .collect();
///
/// assert_eq!(turns, vec![Turn::new("Alice", "hi")]);
/// ```
#[derive(Debug, Clone)]
pub struct LineParser {
    notices: Vec<String>,
    sender: Regex,
    prefix: Regex,
}

impl LineParser {
    /// Creates a parser with the default notice set and patterns.
    pub fn new() -> Self {
        Self::with_config(&ParserConfig::default()).expect("default parser config is valid")
    }

    /// Creates a parser from configuration, compiling its patterns.
    pub fn with_config(config: &ParserConfig) -> Result<Self> {
        let sender = compile(&config.sender_pattern)?;
        if sender.captures_len() < 2 {
            return Err(DialogpackError::invalid_config(format!(
                "sender_pattern '{}' needs a capture group for the sender",
                config.sender_pattern
            )));
        }

        Ok(Self {
            notices: config.notices.clone(),
            sender,
            prefix: compile(&config.prefix_pattern)?,
        })
    }

    /// Returns `true` if the line contains one of the notice literals.
    pub fn is_notice(&self, line: &str) -> bool {
        self.notices.iter().any(|notice| line.contains(notice.as_str()))
    }

    /// Extracts sender and message from a single line.
    ///
    /// Notice filtering is not applied here; see [`parse_lines`](Self::parse_lines).
    pub fn parse_line(&self, line: &str) -> ParsedEntry {
        let sender = self
            .sender
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty());

        match sender {
            Some(sender) => ParsedEntry::new(sender, self.strip_prefix(line)),
            None => ParsedEntry::unmatched(line),
        }
    }

    /// Lazily turns lines into single-message turns.
    ///
    /// Lines are expected to be trimmed and non-empty (see [`transcript_lines`]).
    /// Notice lines and lines without a sender are skipped without breaking
    /// the order of the remaining entries.
    pub fn parse_lines<'a, I, S>(&'a self, lines: I) -> impl Iterator<Item = Turn> + 'a
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
        S: AsRef<str>,
    {
        lines.into_iter().filter_map(move |line| {
            let line = line.as_ref();
            if self.is_notice(line) {
                return None;
            }
            self.parse_line(line).into_turn()
        })
    }

    fn strip_prefix<'l>(&self, line: &'l str) -> Cow<'l, str> {
        self.prefix.replace(line, "")
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits raw text into trimmed, non-empty lines.
pub fn transcript_lines(content: &str) -> impl Iterator<Item = &str> {
    content.lines().map(str::trim).filter(|line| !line.is_empty())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| DialogpackError::invalid_pattern(pattern, e))
}
