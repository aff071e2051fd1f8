//! CSV output writer.

use std::borrow::Borrow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::turn::DialogueRecord;

/// Column names, in order.
pub const CSV_HEADER: [&str; 2] = ["Context", "Reply"];

/// Writes records to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `Context`, `Reply`
/// - Fields with newlines, commas or quotes are quoted
/// - Encoding: UTF-8
///
/// The header is written even when there are no records.
pub fn write_csv(records: &[DialogueRecord], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_csv_to(BufWriter::new(file), records)?;
    Ok(())
}

/// Converts records to a CSV string.
pub fn to_csv(records: &[DialogueRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv_to(&mut buffer, records)?;
    Ok(String::from_utf8(buffer)?)
}

/// Writes records to any writer and returns how many rows were written.
///
/// Accepts owned or borrowed records, so it can drain a streaming iterator.
pub fn write_csv_to<W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator,
    I::Item: Borrow<DialogueRecord>,
{
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;

    let mut written = 0;
    for record in records {
        let record = record.borrow();
        writer.write_record([&record.context, &record.reply])?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}
