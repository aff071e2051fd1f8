//! End-to-end transcript pipelines.
//!
//! A [`Pipeline`] loads one transcript, builds dialogue records from it and
//! writes the requested output. The raw and structured variants share every
//! stage after parsing:
//!
//! ```text
//! raw text ──► LineParser ──► TurnMerger ──┐
//!                                          ├──► turns ──► JSON
//! JSON array ──────────────────────────────┘      │
//!                                                 └──► ContextWindowBuilder ──► CSV / JSONL
//! ```
//!
//! A structured file that fails to parse aborts its run before any output
//! file is created. So does an output path that resolves to the input file.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use dialogpack::config::PipelineConfig;
//! use dialogpack::format::OutputFormat;
//! use dialogpack::pipeline::RawTranscriptPipeline;
//!
//! let pipeline = RawTranscriptPipeline::raw(&PipelineConfig::default())?;
//! let report = pipeline.run(Path::new("chat.txt"), Path::new("dataset.csv"), OutputFormat::Csv)?;
//! println!("{} records", report.records.unwrap_or(0));
//! # Ok::<(), dialogpack::DialogpackError>(())
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::core::output::{to_csv, to_json, to_jsonl, write_csv, write_json, write_jsonl};
use crate::core::{ContextWindowBuilder, SelectionMode};
use crate::error::{DialogpackError, Result};
use crate::format::OutputFormat;
use crate::parser::{SourceKind, Transcript, TranscriptParser, create_parser};
use crate::parsers::{RawTranscriptParser, StructuredTranscriptParser};
use crate::turn::DialogueRecord;

/// Pipeline over raw line-oriented transcripts.
pub type RawTranscriptPipeline = Pipeline<RawTranscriptParser>;

/// Pipeline over structured JSON transcripts.
pub type StructuredTranscriptPipeline = Pipeline<StructuredTranscriptParser>;

/// Pipeline selected at runtime from a [`SourceKind`].
pub type DynPipeline = Pipeline<Box<dyn TranscriptParser>>;

/// Statistics about one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Where the output was written.
    pub output: PathBuf,
    /// What was written there.
    pub format: OutputFormat,
    /// Input messages (parsed entries for raw input, array elements for structured).
    pub input_messages: usize,
    /// Turns after merging.
    pub turns: usize,
    /// Records written; `None` for formats that write turns.
    pub records: Option<usize>,
}

impl PipelineReport {
    /// Percentage of input messages folded away by merging.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_messages == 0 {
            return 0.0;
        }
        let ratio = self.turns as f64 / self.input_messages as f64;
        (1.0 - ratio) * 100.0
    }

    /// Returns `true` if a record format was written with zero rows.
    pub fn is_empty_result(&self) -> bool {
        self.records == Some(0)
    }
}

/// Load → window → write, for one parser type.
#[derive(Debug, Clone)]
pub struct Pipeline<P> {
    parser: P,
    builder: ContextWindowBuilder,
    mode: SelectionMode,
}

impl RawTranscriptPipeline {
    /// Creates a raw transcript pipeline from configuration.
    pub fn raw(config: &PipelineConfig) -> Result<Self> {
        Self::with_parser(RawTranscriptParser::with_config(&config.parser)?, config)
    }
}

impl StructuredTranscriptPipeline {
    /// Creates a structured transcript pipeline from configuration.
    pub fn structured(config: &PipelineConfig) -> Result<Self> {
        let parser = StructuredTranscriptParser::new().with_merge(config.merge_structured);
        Self::with_parser(parser, config)
    }
}

impl DynPipeline {
    /// Creates a pipeline for the given source kind.
    pub fn for_source(kind: SourceKind, config: &PipelineConfig) -> Result<Self> {
        Self::with_parser(create_parser(kind, config)?, config)
    }
}

impl<P: TranscriptParser> Pipeline<P> {
    /// Wraps an existing parser; window size and target come from `config`.
    pub fn with_parser(parser: P, config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser,
            builder: ContextWindowBuilder::with_size(config.window_size),
            mode: SelectionMode::from_target(config.target_user.as_deref()),
        })
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn mode(&self) -> &SelectionMode {
        &self.mode
    }

    /// Reads and parses one input file.
    pub fn load(&self, input: &Path) -> Result<Transcript> {
        debug!(input = %input.display(), parser = self.parser.name(), "loading transcript");
        self.parser.parse(input)
    }

    /// Builds the dialogue records for a loaded transcript.
    pub fn records(&self, transcript: &Transcript) -> Vec<DialogueRecord> {
        self.builder.build_records(&transcript.turns, &self.mode)
    }

    /// Runs the whole pipeline for one file.
    ///
    /// A zero-record result is not an error: the (header-only) output is
    /// still written and a warning is logged. An `output` that is the same
    /// file as `input` is rejected before anything is read.
    pub fn run(&self, input: &Path, output: &Path, format: OutputFormat) -> Result<PipelineReport> {
        if same_file(input, output) {
            return Err(DialogpackError::output_is_input(output));
        }
        let transcript = self.load(input)?;

        let records = match format {
            OutputFormat::Json => {
                write_json(&transcript.turns, output)?;
                None
            }
            OutputFormat::Csv => {
                let records = self.records(&transcript);
                write_csv(&records, output)?;
                Some(records.len())
            }
            OutputFormat::Jsonl => {
                let records = self.records(&transcript);
                write_jsonl(&records, output)?;
                Some(records.len())
            }
        };

        let report = PipelineReport {
            output: output.to_path_buf(),
            format,
            input_messages: transcript.input_messages,
            turns: transcript.len(),
            records,
        };
        self.log_report(input, &report);
        Ok(report)
    }

    /// Runs the pipeline on in-memory content and returns the rendered output.
    pub fn run_str(&self, content: &str, format: OutputFormat) -> Result<String> {
        let transcript = self.parser.parse_str(content)?;
        match format {
            OutputFormat::Json => to_json(&transcript.turns),
            OutputFormat::Csv => to_csv(&self.records(&transcript)),
            OutputFormat::Jsonl => to_jsonl(&self.records(&transcript)),
        }
    }

    fn log_report(&self, input: &Path, report: &PipelineReport) {
        info!(
            input = %input.display(),
            output = %report.output.display(),
            format = %report.format,
            messages = report.input_messages,
            turns = report.turns,
            records = ?report.records,
            "transcript processed"
        );

        if report.is_empty_result() {
            match &self.mode {
                SelectionMode::TargetSender(user) => warn!(
                    input = %input.display(),
                    target = %user,
                    "no dialogue records produced: target sender never replies after the first turn"
                ),
                SelectionMode::Unconditional => warn!(
                    input = %input.display(),
                    "no dialogue records produced: transcript has fewer than two turns"
                ),
            }
        }
    }
}

/// Returns `true` if both paths exist and resolve to the same file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Absolute form of a path that may not exist yet.
///
/// The parent directory is canonicalized when it exists, so `out/a.csv` and
/// `./out/../out/a.csv` compare equal. Falls back to the path as given.
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}
