//! Batch processing command for multiple receipt files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use dekont_core::{DekontConfig, ReceiptDispatcher, TransactionRecord};

use super::load_config;
use super::output::{OutputFormat, format_record};
use super::process::{dispatcher_for, extract_pdf};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching receipt PDFs or extracted `.txt` files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    record: Option<TransactionRecord>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Each file is independent CPU work; the semaphore bounds how many run at once
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let config = Arc::new(config);
    let dispatcher = dispatcher_for(&config);

    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let permit = semaphore.clone().acquire_owned().await?;
        let config = config.clone();
        let dispatcher = dispatcher.clone();
        let pb = overall_pb.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let file_start = Instant::now();
            let result = process_single_file(&path, &config, &dispatcher);
            let processing_time_ms = file_start.elapsed().as_millis() as u64;
            pb.inc(1);
            drop(permit);

            match result {
                Ok(record) => FileResult {
                    path,
                    record: Some(record),
                    error: None,
                    processing_time_ms,
                },
                Err(e) => FileResult {
                    path,
                    record: None,
                    error: Some(format!("{:#}", e)),
                    processing_time_ms,
                },
            }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await?;
        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                overall_pb.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }
        results.push(result);
    }

    overall_pb.finish_and_clear();

    for result in &results {
        if let (Some(record), Some(output_dir)) = (&result.record, &args.output_dir) {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("dekont");
            let output_path = output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_record(record, args.format, false)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn process_single_file(
    path: &Path,
    config: &DekontConfig,
    dispatcher: &ReceiptDispatcher,
) -> anyhow::Result<TransactionRecord> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => extract_pdf(path, config, dispatcher),
        "txt" => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(dispatcher.extract(&text))
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "bank",
        "transaction_date",
        "amount",
        "sender_name",
        "receiver_name",
        "warnings",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(record) = &result.record {
            wtr.write_record([
                filename,
                "success",
                record.bank.as_str(),
                &record.transaction_date,
                &record.amount.map(|a| a.to_string()).unwrap_or_default(),
                &record.sender.name,
                &record.receiver.name,
                &record.diagnostics.warnings.len().to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
