//! Core transformation logic for dialogpack.
//!
//! This module contains:
//! - [`line_parser`] - sender/message extraction for raw lines
//! - [`merger`] - consecutive same-sender merging
//! - [`window`] - context windows and dialogue records
//! - [`output`] - format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use dialogpack::core::{ContextWindowBuilder, LineParser, SelectionMode, merge_turns};
//!
//! let lines = [
//!     "1/1/24, 10:00 - Alice: hi",
//!     "1/1/24, 10:01 - Alice: how are you",
//!     "1/1/24, 10:02 - Bob: good thanks",
//! ];
//!
//! let parser = LineParser::new();
//! let turns = merge_turns(parser.parse_lines(lines));
//! let records = ContextWindowBuilder::new().build_records(&turns, &SelectionMode::Unconditional);
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].context, "Alice: hi how are you\n");
//! assert_eq!(records[0].reply, "good thanks");
//! ```

pub mod line_parser;
pub mod merger;
pub mod output;
pub mod window;

pub use line_parser::{LineParser, transcript_lines};
pub use merger::{MergeTurns, TurnMerger, merge_iter, merge_turns};
pub use output::{to_csv, to_json, to_jsonl, write_csv, write_json, write_jsonl};
pub use window::{ContextWindow, ContextWindowBuilder, SelectionMode, WindowedRecords};
