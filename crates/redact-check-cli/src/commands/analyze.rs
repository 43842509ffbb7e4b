//! `analyze` subcommand - scan a PDF and print its audit log.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use redact_check::{analyze, AnalyzeOptions};

use crate::{read_input, OutputFormat};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// PDF file to scan.
    path: PathBuf,

    /// How to render the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.path)?;
    let file_name = args.path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();

    let report = analyze(&bytes, &file_name, AnalyzeOptions::default())
        .with_context(|| format!("failed to analyze '{}'", args.path.display()))?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).context("failed to serialize audit log")?);
        }
        OutputFormat::Text => {
            println!("{} ({} pages)", report.source.file_name, report.source.page_count);
            println!("pages flagged: {}", report.summary.pages_flagged);
            for page in &report.pages {
                println!(
                    "  page {}: {:?} (confidence {}), {} dark rect(s), {} redact annot(s)",
                    page.page, page.risk, page.confidence, page.signals.dark_rects, page.signals.redact_annots
                );
            }
        }
    }

    Ok(())
}
