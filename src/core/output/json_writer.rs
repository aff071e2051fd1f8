//! JSON output writer for merged turns.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::turn::Turn;

/// Writes turns to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {
///     "Alice": "hi how are you"
///   },
///   {
///     "Bob": "good thanks"
///   }
/// ]
/// ```
///
/// Non-ASCII text is written as-is. The output can be fed back in as a
/// structured transcript.
pub fn write_json(turns: &[Turn], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(turns)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts turns to a pretty-printed JSON string.
pub fn to_json(turns: &[Turn]) -> Result<String> {
    Ok(serde_json::to_string_pretty(turns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_to_json_basic() {
        let turns = vec![Turn::new("Alice", "hi how are you"), Turn::new("Bob", "good thanks")];
        let json = to_json(&turns).unwrap();

        assert!(json.contains(r#""Alice": "hi how are you""#));
        assert!(json.contains(r#""Bob": "good thanks""#));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_to_json_keeps_unicode() {
        let json = to_json(&[Turn::new("Иван", "Привет 🎉")]).unwrap();
        assert!(json.contains("Иван"));
        assert!(json.contains("Привет 🎉"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_write_json_roundtrip() {
        let turns = vec![Turn::new("A", "x"), Turn::new("B", "y")];
        let temp_file = NamedTempFile::new().unwrap();

        write_json(&turns, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let parsed: Vec<Turn> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, turns);
    }
}
