//! convert - turn dprose classification records into a servable directory

use anyhow::Context;
use clap::Parser;
use dprose_common::logging::{init_logging, LogConfig, LogLevel, LoggingGuard};
use dprose_convert::{pipeline, ConvertConfig, Delimiter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "convert")]
#[command(author, version, about = "Transform dprose.jsonlines and its metadata into a directory for serving")]
struct Cli {
    /// Input jsonlines file with pre-computed events and dprose ids
    records_file: PathBuf,

    /// Metadata table (CSV or TSV) with one row per text
    metadata_file: PathBuf,

    /// Output directory
    out_dir: PathBuf,

    /// Metadata delimiter: comma, tab, semicolon or a single character
    /// (default: tab for .tsv/.tab files, comma otherwise)
    #[arg(short, long)]
    delimiter: Option<Delimiter>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Keep the guard alive until exit so file logs are flushed
    let _guard = match setup_logging(cli.verbose) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        },
    };

    let mut config = ConvertConfig::new(&cli.records_file, &cli.metadata_file, &cli.out_dir)
        .with_progress(!cli.verbose);
    if let Some(delimiter) = cli.delimiter {
        config = config.with_delimiter(delimiter);
    }

    match pipeline::run(&config) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!(error = %e, "Conversion failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Quiet by default, debug with `--verbose`; `DPROSE_LOG_*` variables win
fn setup_logging(verbose: bool) -> anyhow::Result<LoggingGuard> {
    let level = if verbose { LogLevel::Debug } else { LogLevel::Warn };
    let config = LogConfig::builder()
        .level(level)
        .log_file_prefix("convert")
        .build()
        .merge_env()
        .context("Invalid DPROSE_LOG_* setting")?;

    init_logging(&config)
}
