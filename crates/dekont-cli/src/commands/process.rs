//! Process command - extract transfer details from a single receipt PDF.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use dekont_core::pdf::read_receipt_text;
use dekont_core::{DekontConfig, ReceiptDispatcher, TracingSink, TransactionRecord};

use super::output::{OutputFormat, format_record};
use super::{load_config, report_failure};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input receipt PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    match process(&args, config_path) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => Ok(report_failure(&err)),
    }
}

fn process(args: &ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    pb.set_message("Extracting text...");
    let record = extract_pdf(&args.input, &config, &dispatcher_for(&config))?;
    pb.finish_and_clear();

    write_output(&record, args.format, args.pretty, args.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

/// Dispatcher configured from `config`, logging pipeline events.
pub fn dispatcher_for(config: &DekontConfig) -> ReceiptDispatcher {
    ReceiptDispatcher::new()
        .with_config(config.extraction.clone())
        .with_sink(Arc::new(TracingSink))
}

/// Read a receipt PDF and extract its record.
pub fn extract_pdf(
    path: &Path,
    config: &DekontConfig,
    dispatcher: &ReceiptDispatcher,
) -> anyhow::Result<TransactionRecord> {
    let text = read_receipt_text(path, &config.pdf)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("Read {} chars from {}", text.len(), path.display());
    Ok(dispatcher.extract(&text))
}

/// Write a rendered record to `output`, or stdout.
pub fn write_output(
    record: &TransactionRecord,
    format: OutputFormat,
    pretty: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let rendered = format_record(record, format, pretty)?;

    if let Some(output_path) = output {
        fs::write(output_path, &rendered)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", rendered.trim_end());
    }
    Ok(())
}
