//! Turn and record types shared by every pipeline stage.
//!
//! - [`ParsedEntry`] is what the line parser extracts from one raw line.
//! - [`Turn`] is one logical utterance: a sender and their (possibly merged)
//!   message text.
//! - [`DialogueRecord`] is one `(context, reply)` training example.
//!
//! # Wire format
//!
//! A [`Turn`] serializes as a mapping with exactly one key, the sender:
//!
//! ```
//! use dialogpack::Turn;
//!
//! let turn = Turn::new("Alice", "hi how are you");
//! let json = serde_json::to_string(&turn)?;
//! assert_eq!(json, r#"{"Alice":"hi how are you"}"#);
//!
//! let parsed: Turn = serde_json::from_str(&json)?;
//! assert_eq!(parsed, turn);
//! # Ok::<(), serde_json::Error>(())
//! ```
//!
//! Mappings with zero or several keys are rejected on the way in.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One raw line after sender/message extraction.
///
/// `sender` is `None` for system notices and continuation lines that carry no
/// `- <sender>:` marker. Such entries never reach the merger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// Sender captured from the `- <sender>:` marker, if any.
    pub sender: Option<String>,
    /// Message text with the `<preamble> - <sender>: ` prefix removed.
    pub message: String,
}

impl ParsedEntry {
    /// Creates an entry with a known sender.
    pub fn new(sender: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sender: Some(sender.into()),
            message: message.into(),
        }
    }

    /// Creates an entry for a line without a sender marker.
    pub fn unmatched(line: impl Into<String>) -> Self {
        Self {
            sender: None,
            message: line.into(),
        }
    }

    /// Converts into a single-message [`Turn`].
    ///
    /// Returns `None` when the sender is absent or empty.
    pub fn into_turn(self) -> Option<Turn> {
        match self.sender {
            Some(sender) if !sender.is_empty() => Some(Turn {
                sender,
                message: self.message,
            }),
            _ => None,
        }
    }
}

/// One logical utterance in a conversation.
///
/// Produced by merging consecutive entries from the same sender, or read
/// directly from a structured transcript.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Turn {
    /// Who said it.
    pub sender: String,
    /// What they said. Merged messages are joined with a single space.
    pub message: String,
}

impl Turn {
    /// Creates a new turn.
    pub fn new(sender: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
        }
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Renders as a context line without the trailing newline: `sender: message`.
impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.sender, self.message)
    }
}

impl Serialize for Turn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.sender, &self.message)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Turn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TurnVisitor)
    }
}

struct TurnVisitor;

impl<'de> Visitor<'de> for TurnVisitor {
    type Value = Turn;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping with exactly one sender key and a message string")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Turn, A::Error> {
        let Some((sender, message)) = map.next_entry::<String, String>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };

        let mut extra = 0usize;
        while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {
            extra += 1;
        }
        if extra > 0 {
            return Err(de::Error::invalid_length(extra + 1, &self));
        }

        Ok(Turn { sender, message })
    }
}

/// One supervised training example.
///
/// `context` is the rendered window of turns before the reply, one
/// `sender: message\n` line per turn. Serialized with the column names
/// `Context` and `Reply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueRecord {
    #[serde(rename = "Context")]
    pub context: String,
    #[serde(rename = "Reply")]
    pub reply: String,
}

impl DialogueRecord {
    /// Creates a new record.
    pub fn new(context: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            reply: reply.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_into_turn() {
        let turn = ParsedEntry::new("Alice", "hi").into_turn().unwrap();
        assert_eq!(turn, Turn::new("Alice", "hi"));
    }

    #[test]
    fn test_unmatched_entry_has_no_turn() {
        assert!(ParsedEntry::unmatched("Alice added Bob").into_turn().is_none());
    }

    #[test]
    fn test_empty_sender_has_no_turn() {
        assert!(ParsedEntry::new("", "text").into_turn().is_none());
    }

    #[test]
    fn test_turn_display() {
        assert_eq!(Turn::new("Bob", "good thanks").to_string(), "Bob: good thanks");
    }

    #[test]
    fn test_turn_serialize_single_key() {
        let json = serde_json::to_string(&Turn::new("Иван", "Привет 🎉")).unwrap();
        assert_eq!(json, r#"{"Иван":"Привет 🎉"}"#);
    }

    #[test]
    fn test_turn_deserialize() {
        let turn: Turn = serde_json::from_str(r#"{"A": "x"}"#).unwrap();
        assert_eq!(turn.sender(), "A");
        assert_eq!(turn.message(), "x");
    }

    #[test]
    fn test_turn_rejects_empty_mapping() {
        assert!(serde_json::from_str::<Turn>("{}").is_err());
    }

    #[test]
    fn test_turn_rejects_multiple_keys() {
        let err = serde_json::from_str::<Turn>(r#"{"A": "x", "B": "y"}"#).unwrap_err();
        assert!(err.to_string().contains("exactly one sender key"));
    }

    #[test]
    fn test_turn_rejects_non_string_message() {
        assert!(serde_json::from_str::<Turn>(r#"{"A": 42}"#).is_err());
    }

    #[test]
    fn test_turn_rejects_array() {
        assert!(serde_json::from_str::<Turn>(r#"["A", "x"]"#).is_err());
    }

    #[test]
    fn test_record_serde_names() {
        let record = DialogueRecord::new("A: x\n", "y");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Context":"A: x\n","Reply":"y"}"#);
    }
}
