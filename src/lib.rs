//! # Dialogpack
//!
//! A Rust library for turning exported chat transcripts into supervised
//! `(context, reply)` dialogue datasets for fine-tuning conversational models.
//!
//! ## Overview
//!
//! Two input shapes are supported:
//! - **Raw transcripts** - line-oriented exports such as
//!   `1/1/24, 10:00 - Alice: hi`
//! - **Structured transcripts** - a JSON array of `{sender: message}` mappings
//!
//! Both go through the same core: consecutive messages from one sender are
//! merged into a single turn, and every reply turn gets a context window of
//! up to five preceding turns.
//!
//! ## Quick Start
//!
//! ```rust
//! use dialogpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let pipeline = RawTranscriptPipeline::raw(&PipelineConfig::default())?;
//!
//!     let csv = pipeline.run_str(
//!         "1/1/24, 10:00 - Alice: hi\n\
//!          1/1/24, 10:01 - Alice: how are you\n\
//!          1/1/24, 10:02 - Bob: good thanks",
//!         OutputFormat::Csv,
//!     )?;
//!
//!     assert!(csv.starts_with("Context,Reply"));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] - the transformation itself
//!   - [`LineParser`](core::LineParser), [`TurnMerger`](core::TurnMerger),
//!     [`ContextWindowBuilder`](core::ContextWindowBuilder)
//!   - [`core::output`] - [`write_csv`](core::write_csv), [`write_json`](core::write_json), [`write_jsonl`](core::write_jsonl)
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser) trait, [`SourceKind`](parser::SourceKind)
//! - [`parsers`] - raw and structured transcript parsers
//! - [`pipeline`] - [`RawTranscriptPipeline`](pipeline::RawTranscriptPipeline),
//!   [`StructuredTranscriptPipeline`](pipeline::StructuredTranscriptPipeline)
//! - [`config`] - [`PipelineConfig`](config::PipelineConfig), [`ParserConfig`](config::ParserConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - [`error`] - [`DialogpackError`], [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsers;
pub mod pipeline;
pub mod turn;

// Re-export the main types at the crate root for convenience
pub use error::{DialogpackError, Result};
pub use turn::{DialogueRecord, ParsedEntry, Turn};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use dialogpack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{DialogueRecord, Turn};

    pub use crate::error::{DialogpackError, Result};

    pub use crate::config::{ParserConfig, PipelineConfig};

    pub use crate::core::{
        ContextWindowBuilder, LineParser, SelectionMode, TurnMerger, merge_turns,
    };

    pub use crate::core::output::{to_csv, to_json, to_jsonl, write_csv, write_json, write_jsonl};

    pub use crate::format::OutputFormat;

    pub use crate::parser::{SourceKind, Transcript, TranscriptParser};

    pub use crate::pipeline::{
        PipelineReport, RawTranscriptPipeline, StructuredTranscriptPipeline,
    };
}
