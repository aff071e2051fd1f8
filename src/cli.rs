//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`Source`] - supported transcript shapes
//! - [`OutputFormat`] - output format options
//!
//! Both enums convert into their library counterparts
//! ([`SourceKind`](crate::parser::SourceKind),
//! [`format::OutputFormat`](crate::format::OutputFormat)).

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::{DialogpackError, Result};
use crate::pipeline::{resolve_path, same_file};

/// Turn exported chat transcripts into (context, reply) datasets
/// for fine-tuning conversational models.
#[derive(Parser, Debug, Clone)]
#[command(name = "dialogpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    dialogpack raw chat.txt
    dialogpack wa chat.txt -o dataset.csv --window 3
    dialogpack raw chat.txt -o turns.json
    dialogpack structured turns.json -u Alice
    dialogpack json a.json b.json -o out/ -f jsonl")]
pub struct Args {
    /// Transcript shape
    #[arg(value_enum)]
    pub source: Source,

    /// Input files; each is processed independently
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output file (one input) or directory (several inputs)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format [default: from the --output extension, else csv]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Only emit records whose reply comes from this sender
    #[arg(short = 'u', long, value_name = "USER")]
    pub target_user: Option<String>,

    /// Number of prior turns in each context window
    #[arg(short, long, value_name = "TURNS")]
    pub window: Option<usize>,

    /// Drop lines containing this text (repeatable; replaces the default notice)
    #[arg(long, value_name = "TEXT")]
    pub notice: Vec<String>,

    /// Merge consecutive same-sender records of structured input
    #[arg(long)]
    pub merge_structured: bool,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the pipeline configuration: config file first, then flags.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_toml_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(window) = self.window {
            config.window_size = window;
        }
        if let Some(user) = &self.target_user {
            config.target_user = Some(user.clone());
        }
        if !self.notice.is_empty() {
            config.parser.notices.clone_from(&self.notice);
        }
        if self.merge_structured {
            config.merge_structured = true;
        }

        config.validate()?;
        Ok(config)
    }

    /// Format to write: `--format` if given, otherwise inferred from the
    /// extension of a single-input `--output` file, otherwise CSV.
    pub fn output_format(&self) -> crate::format::OutputFormat {
        if let Some(format) = self.format {
            return format.into();
        }
        match &self.output {
            Some(path) if self.inputs.len() == 1 => {
                crate::format::OutputFormat::from_path(path).unwrap_or_default()
            }
            _ => crate::format::OutputFormat::default(),
        }
    }

    /// Output path for one of the inputs.
    ///
    /// With a single input, `--output` is the file itself (default
    /// `dialogue_dataset.<ext>`). With several, `--output` is a directory
    /// (default: current directory) and each file is named after its input.
    pub fn output_for(&self, input: &Path) -> PathBuf {
        let ext = self.output_format().extension();

        if self.inputs.len() == 1 {
            return self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("dialogue_dataset.{ext}")));
        }

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dialogue_dataset".to_string());
        let dir = self.output.clone().unwrap_or_default();
        dir.join(format!("{stem}.{ext}"))
    }

    /// Pairs every input with its output path.
    ///
    /// An output that is one of the inputs, or that an earlier input already
    /// claimed, becomes an error for that input alone. Output directories
    /// should exist before this is called so claimed paths compare resolved.
    pub fn output_plan(&self) -> Vec<(PathBuf, Result<PathBuf>)> {
        let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();

        self.inputs
            .iter()
            .map(|input| {
                let output = self.output_for(input);
                let planned = if self.inputs.iter().any(|other| same_file(other, &output)) {
                    Err(DialogpackError::output_is_input(&output))
                } else {
                    match claimed.entry(resolve_path(&output)) {
                        Entry::Occupied(first) => {
                            Err(DialogpackError::duplicate_output(&output, first.get()))
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(input);
                            Ok(output)
                        }
                    }
                };
                (input.clone(), planned)
            })
            .collect()
    }
}

/// Supported transcript shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Line-oriented export text (`<preamble> - <sender>: <message>`)
    #[value(alias = "txt", alias = "wa")]
    #[serde(alias = "txt", alias = "wa")]
    Raw,

    /// JSON array of {sender: message} objects
    #[value(alias = "json")]
    #[serde(alias = "json")]
    Structured,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Raw => write!(f, "Raw"),
            Source::Structured => write!(f, "Structured"),
        }
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<crate::parser::SourceKind>().map(Source::from)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Context,Reply CSV of dialogue records (default)
    #[default]
    Csv,

    /// Pretty JSON array of merged turns
    Json,

    /// JSON Lines of dialogue records
    #[value(alias = "ndjson")]
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::format::OutputFormat::from(*self).extension()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.parse::<crate::format::OutputFormat>()? {
            crate::format::OutputFormat::Csv => Ok(OutputFormat::Csv),
            crate::format::OutputFormat::Json => Ok(OutputFormat::Json),
            crate::format::OutputFormat::Jsonl => Ok(OutputFormat::Jsonl),
        }
    }
}

impl From<Source> for crate::parser::SourceKind {
    fn from(source: Source) -> Self {
        match source {
            Source::Raw => crate::parser::SourceKind::Raw,
            Source::Structured => crate::parser::SourceKind::Structured,
        }
    }
}

impl From<crate::parser::SourceKind> for Source {
    fn from(kind: crate::parser::SourceKind) -> Self {
        match kind {
            crate::parser::SourceKind::Raw => Source::Raw,
            crate::parser::SourceKind::Structured => Source::Structured,
        }
    }
}

impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("dialogpack").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_source_aliases() {
        assert_eq!(args(&["wa", "chat.txt"]).source, Source::Raw);
        assert_eq!(args(&["json", "chat.json"]).source, Source::Structured);
    }

    #[test]
    fn test_requires_input() {
        assert!(Args::try_parse_from(["dialogpack", "raw"]).is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = args(&["raw", "chat.txt", "-w", "3", "-u", "Bob", "--notice", "<Media omitted>"])
            .pipeline_config()
            .unwrap();
        assert_eq!(config.window_size, 3);
        assert_eq!(config.target_user.as_deref(), Some("Bob"));
        assert_eq!(config.parser.notices, vec!["<Media omitted>".to_string()]);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(args(&["raw", "chat.txt", "-w", "0"]).pipeline_config().is_err());
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dialogpack.toml");
        std::fs::write(&path, "window_size = 2\ntarget_user = \"Alice\"\n").unwrap();

        let config = args(&["raw", "chat.txt", "-c", path.to_str().unwrap(), "-u", "Bob"])
            .pipeline_config()
            .unwrap();
        assert_eq!(config.window_size, 2);
        assert_eq!(config.target_user.as_deref(), Some("Bob"));
    }

    #[test]
    fn test_output_single_input() {
        let a = args(&["raw", "chat.txt"]);
        assert_eq!(a.output_for(Path::new("chat.txt")), PathBuf::from("dialogue_dataset.csv"));

        let a = args(&["raw", "chat.txt", "-f", "json", "-o", "turns.json"]);
        assert_eq!(a.output_for(Path::new("chat.txt")), PathBuf::from("turns.json"));
    }

    #[test]
    fn test_format_inferred_from_output() {
        use crate::format::OutputFormat as Format;

        assert_eq!(args(&["raw", "chat.txt"]).output_format(), Format::Csv);
        assert_eq!(args(&["raw", "chat.txt", "-o", "turns.jsonl"]).output_format(), Format::Jsonl);
        assert_eq!(args(&["raw", "chat.txt", "-o", "turns.JSON"]).output_format(), Format::Json);
        assert_eq!(args(&["raw", "chat.txt", "-o", "dataset.txt"]).output_format(), Format::Csv);
        assert_eq!(args(&["raw", "chat.txt", "-o", "d.jsonl", "-f", "csv"]).output_format(), Format::Csv);
        // Several inputs: -o is a directory, not a file name.
        assert_eq!(args(&["raw", "a.txt", "b.txt", "-o", "out.json"]).output_format(), Format::Csv);
    }

    #[test]
    fn test_output_plan_rejects_input_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        std::fs::write(&a, "[]").unwrap();
        std::fs::write(&b, "[]").unwrap();

        let out = dir.path().to_str().unwrap();
        let parsed = args(&["json", a.to_str().unwrap(), b.to_str().unwrap(), "-o", out, "-f", "json"]);
        let plan = parsed.output_plan();

        assert_eq!(plan.len(), 2);
        for (_, planned) in &plan {
            assert!(planned.as_ref().unwrap_err().is_output_conflict());
        }
    }

    #[test]
    fn test_output_plan_first_claim_wins() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();

        let parsed = args(&["json", "x/chat.json", "y/chat.json", "z/other.json", "-o", out.to_str().unwrap()]);
        let plan = parsed.output_plan();

        assert_eq!(plan[0].1.as_ref().unwrap(), &out.join("chat.csv"));
        let err = plan[1].1.as_ref().unwrap_err();
        assert!(err.is_output_conflict());
        assert!(err.to_string().contains("x/chat.json"));
        assert_eq!(plan[2].1.as_ref().unwrap(), &out.join("other.csv"));
    }

    #[test]
    fn test_output_multiple_inputs() {
        let a = args(&["json", "in/a.json", "in/b.json", "-o", "out", "-f", "jsonl"]);
        assert_eq!(a.output_for(Path::new("in/a.json")), PathBuf::from("out/a.jsonl"));

        let a = args(&["json", "a.json", "b.json"]);
        assert_eq!(a.output_for(Path::new("b.json")), PathBuf::from("b.csv"));
    }

    #[test]
    fn test_source_from_str() {
        assert_eq!("txt".parse::<Source>().unwrap(), Source::Raw);
        assert!("telegram".parse::<Source>().is_err());
    }

    #[test]
    fn test_format_conversions() {
        assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
        assert_eq!("ndjson".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
    }
}
