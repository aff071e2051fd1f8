//! JSON Lines (JSONL) output writer.
//!
//! One `{"Context": ..., "Reply": ...}` object per line, which is what most
//! fine-tuning loaders accept directly.

use std::borrow::Borrow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::turn::DialogueRecord;

/// Writes records to a JSONL file.
///
/// # Format
/// ```text
/// {"Context":"Alice: hi\n","Reply":"hey"}
/// {"Context":"Alice: hi\nBob: hey\n","Reply":"what's up"}
/// ```
pub fn write_jsonl(records: &[DialogueRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_jsonl_to(BufWriter::new(file), records)?;
    Ok(())
}

/// Converts records to a JSONL string.
pub fn to_jsonl(records: &[DialogueRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_jsonl_to(&mut buffer, records)?;
    Ok(String::from_utf8(buffer)?)
}

/// Writes records to any writer and returns how many lines were written.
pub fn write_jsonl_to<W, I>(mut writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator,
    I::Item: Borrow<DialogueRecord>,
{
    let mut written = 0;
    for record in records {
        serde_json::to_writer(&mut writer, record.borrow())?;
        writer.write_all(b"\n")?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}
