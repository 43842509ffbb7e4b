//! `clean` subcommand - repair overlays and annotations in a PDF.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use redact_check::{clean, AuditLog, CleanOptions};

use crate::{read_input, OutputFormat};

#[derive(Args)]
pub struct CleanArgs {
    /// PDF file to clean.
    path: PathBuf,

    /// Where to write the cleaned PDF.
    #[arg(short, long)]
    output: PathBuf,

    /// Audit log produced by `analyze --format json`. Every page is always
    /// cleaned regardless; this is carried through only for the record.
    #[arg(long)]
    audit: Option<PathBuf>,

    /// How to render the actions summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

pub fn run(args: CleanArgs) -> anyhow::Result<()> {
    let bytes = read_input(&args.path)?;

    let audit = args
        .audit
        .as_ref()
        .map(|path| -> anyhow::Result<AuditLog> {
            let raw = read_input(path)?;
            serde_json::from_slice(&raw).with_context(|| format!("failed to parse audit log '{}'", path.display()))
        })
        .transpose()?;

    let output = clean(&bytes, CleanOptions { audit: audit.as_ref(), cancel: None })
        .with_context(|| format!("failed to clean '{}'", args.path.display()))?;

    std::fs::write(&args.output, &output.cleaned_bytes)
        .with_context(|| format!("failed to write '{}'", args.output.display()))?;

    match args.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output.actions_summary).context("failed to serialize actions summary")?
            );
        }
        OutputFormat::Text => {
            let s = &output.actions_summary;
            println!("wrote {}", args.output.display());
            println!("removed {} redact annotation(s) across {} page(s)", s.removed_redact_annots_estimate, s.removed_annots_pages);
            println!("removed {} overlay operator sequence(s)", s.removed_overlay_ops_estimate);
        }
    }

    Ok(())
}
