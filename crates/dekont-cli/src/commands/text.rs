//! Text command - run extraction on receipt text that was extracted elsewhere.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use tracing::info;

use super::output::OutputFormat;
use super::process::{dispatcher_for, write_output};
use super::{load_config, report_failure};

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Text file, or `-` for stdin
    #[arg(required = true)]
    input: String,

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

pub async fn run(args: TextArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    match process_text(&args, config_path) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => Ok(report_failure(&err)),
    }
}

fn process_text(args: &TextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = if args.input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        info!("Processing file: {}", args.input);
        fs::read_to_string(&args.input).with_context(|| format!("Failed to read {}", args.input))?
    };

    let record = dispatcher_for(&config).extract(&text);
    write_output(&record, args.format, args.pretty, args.output.as_deref())
}
