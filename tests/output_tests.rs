//! Tests for output writers (CSV, JSON, JSONL) against real files.

use std::fs;

use tempfile::tempdir;

use dialogpack::core::output::{write_csv, write_json, write_jsonl};
use dialogpack::{DialogueRecord, Turn};

fn sample_records() -> Vec<DialogueRecord> {
    vec![
        DialogueRecord::new("Alice: Hello!\n", "Hi Alice!"),
        DialogueRecord::new("Alice: Hello!\nBob: Hi Alice!\n", "Quotes \"and\", commas"),
    ]
}

fn sample_turns() -> Vec<Turn> {
    vec![
        Turn::new("Alice", "Hello!"),
        Turn::new("Иван", "Привет мир"),
        Turn::new("Bob", "🎉"),
    ]
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_write_csv_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    write_csv(&sample_records(), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("Context,Reply\n"));
    assert!(content.contains("\"Alice: Hello!\n\",Hi Alice!\n"));
    assert!(content.contains("\"Quotes \"\"and\"\", commas\""));
}

#[test]
fn test_write_csv_reads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    write_csv(&sample_records(), &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let back: Vec<DialogueRecord> = reader.deserialize::<DialogueRecord>().map(|r| r.unwrap()).collect();
    assert_eq!(back, sample_records());
}

#[test]
fn test_write_csv_empty_has_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    write_csv(&[], &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Context,Reply\n");
}

#[test]
fn test_write_csv_overwrites() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.csv");
    fs::write(&path, "stale content that is much longer than the new file").unwrap();

    write_csv(&[], &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "Context,Reply\n");
}

#[test]
fn test_write_csv_missing_directory() {
    let dir = tempdir().unwrap();
    let err = write_csv(&sample_records(), dir.path().join("nope/out.csv")).unwrap_err();
    assert!(err.is_io());
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_write_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("turns.json");
    write_json(&sample_turns(), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[\n  {\n    \"Alice\": \"Hello!\"\n  },"));
    // Non-ASCII is written as-is.
    assert!(content.contains("\"Иван\": \"Привет мир\""));
    assert!(content.contains("🎉"));

    let back: Vec<Turn> = serde_json::from_str(&content).unwrap();
    assert_eq!(back, sample_turns());
}

#[test]
fn test_write_json_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("turns.json");
    write_json(&[], &path).unwrap();

    let back: Vec<Turn> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(back.is_empty());
}

// ============================================================================
// JSONL
// ============================================================================

#[test]
fn test_write_jsonl_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.jsonl");
    write_jsonl(&sample_records(), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], r#"{"Context":"Alice: Hello!\n","Reply":"Hi Alice!"}"#);

    for (line, expected) in lines.iter().zip(sample_records()) {
        let record: DialogueRecord = serde_json::from_str(line).unwrap();
        assert_eq!(record, expected);
    }
}

#[test]
fn test_write_jsonl_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.jsonl");
    write_jsonl(&[], &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}
