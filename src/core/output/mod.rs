//! Dataset writers.
//!
//! - [`write_csv`] / [`to_csv`] - `Context`,`Reply` table of dialogue records
//! - [`write_json`] / [`to_json`] - pretty JSON array of merged `{sender: message}` turns
//! - [`write_jsonl`] / [`to_jsonl`] - one `{"Context", "Reply"}` object per line
//!
//! # Choosing a Format
//!
//! | Format | Content | Typical use |
//! |--------|---------|-------------|
//! | CSV | records | fine-tuning scripts, spreadsheets |
//! | JSON | turns | inspection, re-feeding as structured input |
//! | JSONL | records | streaming trainers, `datasets` loaders |
//!
//! # Example
//!
//! ```rust,no_run
//! use dialogpack::core::output::{to_csv, write_csv, write_json};
//! use dialogpack::{DialogueRecord, Turn};
//!
//! let turns = vec![Turn::new("Alice", "hi"), Turn::new("Bob", "hey")];
//! let records = vec![DialogueRecord::new("Alice: hi\n", "hey")];
//!
//! write_csv(&records, "dataset.csv")?;
//! write_json(&turns, "turns.json")?;
//!
//! let csv_string = to_csv(&records)?;
//! # Ok::<(), dialogpack::DialogpackError>(())
//! ```

mod csv_writer;
mod json_writer;
mod jsonl_writer;

pub use csv_writer::{CSV_HEADER, to_csv, write_csv, write_csv_to};
pub use json_writer::{to_json, write_json};
pub use jsonl_writer::{to_jsonl, write_jsonl, write_jsonl_to};
