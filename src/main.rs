//! # dialogpack CLI
//!
//! Command-line interface for the dialogpack library.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use dialogpack::DialogpackError;
use dialogpack::cli::Args;
use dialogpack::config::PipelineConfig;
use dialogpack::format::OutputFormat;
use dialogpack::parser::SourceKind;
use dialogpack::pipeline::{DynPipeline, PipelineReport};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(0) => {}
        Ok(failed) => {
            eprintln!("❌ {} of {} file(s) failed", failed, args.inputs.len());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "warn,dialogpack=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();
}

/// Processes every input; returns how many failed.
fn run(args: &Args) -> Result<usize, DialogpackError> {
    let total_start = Instant::now();
    let config = args.pipeline_config()?;
    let kind: SourceKind = args.source.into();
    let format = args.output_format();
    let pipeline = DynPipeline::for_source(kind, &config)?;

    print_header(args, &config, format);

    if args.inputs.len() > 1 {
        if let Some(dir) = &args.output {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut reports = Vec::with_capacity(args.inputs.len());
    let mut failed = 0;

    for (input, output) in args.output_plan() {
        match output.and_then(|output| process_file(&pipeline, &input, &output, format)) {
            Ok(report) => reports.push(report),
            Err(e) => {
                error!(input = %input.display(), "{e}");
                eprintln!("❌ {}: {}", input.display(), e);
                failed += 1;
            }
        }
    }

    print_summary(&reports, failed, format, total_start.elapsed().as_secs_f64());
    Ok(failed)
}

fn process_file(
    pipeline: &DynPipeline,
    input: &Path,
    output: &Path,
    format: OutputFormat,
) -> Result<PipelineReport, DialogpackError> {
    println!("⏳ Processing {}...", input.display());
    let start = Instant::now();
    let report = pipeline.run(input, output, format)?;

    println!(
        "   {} messages → {} turns ({:.1}% merged, {:.2}s)",
        report.input_messages,
        report.turns,
        report.compression_ratio(),
        start.elapsed().as_secs_f64()
    );
    if format.writes_records() {
        match report.records.unwrap_or(0) {
            0 => println!("   ⚠️  No dialogue records produced"),
            n => println!("   {} dialogue records", n),
        }
    }
    println!("💾 Saved to {}", report.output.display());
    Ok(report)
}

fn print_header(args: &Args, config: &PipelineConfig, format: OutputFormat) {
    println!("📦 dialogpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📖 Source:  {}", args.source);
    for input in &args.inputs {
        println!("📂 Input:   {}", input.display());
    }
    println!("📄 Format:  {}", format);
    println!("🪟 Window:  {} turns", config.window_size);
    if let Some(user) = &config.target_user {
        println!("👤 Target:  {}", user);
    }
    println!();
}

fn print_summary(reports: &[PipelineReport], failed: usize, format: OutputFormat, elapsed: f64) {
    let messages: usize = reports.iter().map(|r| r.input_messages).sum();
    let turns: usize = reports.iter().map(|r| r.turns).sum();
    let records: usize = reports.iter().filter_map(|r| r.records).sum();

    println!();
    if failed == 0 {
        println!("✅ Done!");
    }

    println!();
    println!("📊 Summary:");
    println!("   Files:     {} ok, {} failed", reports.len(), failed);
    println!("   Messages:  {}", messages);
    println!("   Turns:     {}", turns);
    if format.writes_records() {
        println!("   Records:   {}", records);
    }
    println!("   Time:      {:.2}s", elapsed);
}
