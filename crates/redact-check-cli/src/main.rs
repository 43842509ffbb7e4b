//! Command-line interface for redact-check.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Detects and repairs improperly redacted PDF documents.
#[derive(Parser)]
#[command(name = "redact-check", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a PDF for redaction overlays that never destroyed the underlying text.
    Analyze(commands::analyze::AnalyzeArgs),
    /// Strip overlay rectangles and redaction annotations from a PDF.
    Clean(commands::clean::CleanArgs),
}

/// How a subcommand should render its result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => commands::analyze::run(args),
        Command::Clean(args) => commands::clean::run(args),
    }
}

pub(crate) fn read_input(path: &PathBuf) -> anyhow::Result<Vec<u8>> {
    use anyhow::Context;
    std::fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))
}
