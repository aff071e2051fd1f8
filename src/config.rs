//! Configuration types for parsing and dataset construction.
//!
//! This module provides plain serde-friendly configuration structs for library
//! usage, without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - notice filters and sender/prefix patterns for raw transcripts
//! - [`PipelineConfig`] - window size, target user and the parser settings
//!
//! Configurations can be built in code or loaded from TOML:
//!
//! ```rust
//! use dialogpack::config::PipelineConfig;
//!
//! let config = PipelineConfig::from_toml_str(r#"
//!     window_size = 3
//!     target_user = "Alice"
//!
//!     [parser]
//!     notices = ["Messages and calls are end-to-end encrypted.", "<Media omitted>"]
//! "#)?;
//!
//! assert_eq!(config.window_size, 3);
//! assert_eq!(config.parser.notices.len(), 2);
//! # Ok::<(), dialogpack::DialogpackError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DialogpackError, Result};

/// The notice line every WhatsApp export starts with.
pub const ENCRYPTION_NOTICE: &str = "Messages and calls are end-to-end encrypted.";

/// Default sender marker: shortest text between `- ` and the next colon.
pub const DEFAULT_SENDER_PATTERN: &str = r"- (.*?):";

/// Default prefix stripped from matched lines: `<preamble> - <sender>: `.
pub const DEFAULT_PREFIX_PATTERN: &str = r"^.*? - .*?: ";

/// Default number of prior turns rendered into a context window.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Configuration for raw transcript parsing.
///
/// # Example
///
/// ```rust
/// use dialogpack::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_notice("<Media omitted>");
/// assert_eq!(config.notices.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Lines containing any of these literals are dropped before parsing.
    pub notices: Vec<String>,

    /// Regex locating the sender; capture group 1 is the sender name.
    pub sender_pattern: String,

    /// Regex whose first match is removed from a line to obtain the message.
    pub prefix_pattern: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            notices: vec![ENCRYPTION_NOTICE.to_string()],
            sender_pattern: DEFAULT_SENDER_PATTERN.to_string(),
            prefix_pattern: DEFAULT_PREFIX_PATTERN.to_string(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one more notice literal to filter out.
    #[must_use]
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notices.push(notice.into());
        self
    }

    /// Replaces the notice set.
    #[must_use]
    pub fn with_notices<I, S>(mut self, notices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notices = notices.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the sender pattern.
    #[must_use]
    pub fn with_sender_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.sender_pattern = pattern.into();
        self
    }

    /// Sets the prefix pattern.
    #[must_use]
    pub fn with_prefix_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.prefix_pattern = pattern.into();
        self
    }
}

/// Configuration shared by both transcript pipelines.
///
/// # Example
///
/// ```rust
/// use dialogpack::config::PipelineConfig;
///
/// let config = PipelineConfig::new()
///     .with_window_size(3)
///     .with_target_user("Alice");
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of prior turns in a context window (default: 5).
    pub window_size: usize,

    /// Only emit records whose reply comes from this sender (default: all).
    pub target_user: Option<String>,

    /// Merge consecutive same-sender records of structured input (default: false).
    pub merge_structured: bool,

    /// Raw transcript parsing settings.
    pub parser: ParserConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            target_user: None,
            merge_structured: false,
            parser: ParserConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Sets the parser configuration.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Sets the context window size.
    #[must_use]
    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window_size = size;
        self
    }

    /// Restricts records to replies from one sender.
    #[must_use]
    pub fn with_target_user(mut self, user: impl Into<String>) -> Self {
        self.target_user = Some(user.into());
        self
    }

    /// Enables or disables merging of structured input.
    #[must_use]
    pub fn with_merge_structured(mut self, enabled: bool) -> Self {
        self.merge_structured = enabled;
        self
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(DialogpackError::invalid_config(
                "window_size must be at least 1",
            ));
        }
        if self.target_user.as_deref() == Some("") {
            return Err(DialogpackError::invalid_config(
                "target_user must not be empty",
            ));
        }
        Ok(())
    }
}
