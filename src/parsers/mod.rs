//! Transcript parsers for the two supported input shapes.
//!
//! - [`RawTranscriptParser`] - line-oriented export text
//! - [`StructuredTranscriptParser`] - JSON array of `{sender: message}` mappings
//!
//! Both implement [`TranscriptParser`](crate::parser::TranscriptParser).

mod raw;
mod structured;

pub use raw::RawTranscriptParser;
pub use structured::StructuredTranscriptParser;
