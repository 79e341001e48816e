#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `sitrep`: extracts weekly per-state case counts from situation reports.
//!
//! Run without a subcommand for an interactive menu.

mod commands;
mod interactive;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sitrep_ingest::config::IngestConfig;

use crate::commands::RunOverrides;

#[derive(Parser)]
#[command(
    name = "sitrep",
    about = "Situation-report case count extraction tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every report in a directory into one CSV
    Run(RunArgs),
    /// Extract a single report and print its rows
    Extract {
        /// Report file (`.pdf` or pre-converted `.txt`)
        file: PathBuf,
        /// Print the full extraction as JSON instead of CSV rows
        #[arg(long)]
        json: bool,
    },
    /// List the canonical regions
    Regions,
}

#[derive(Args)]
struct RunArgs {
    /// Config file (defaults to `sitrep.toml` if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory containing the reports
    #[arg(long)]
    input: Option<PathBuf>,
    /// CSV file to write
    #[arg(long)]
    output: Option<PathBuf>,
    /// Number of documents converted in parallel
    #[arg(long)]
    concurrency: Option<usize>,
    /// Do not add placeholder rows for weeks without a report
    #[arg(long)]
    no_missing: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = sitrep_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi).await;
    };

    match command {
        Commands::Run(args) => {
            let overrides = RunOverrides {
                input: args.input,
                output: args.output,
                concurrency: args.concurrency,
                no_missing: args.no_missing,
            };
            let config = overrides.apply(IngestConfig::load_or_default(args.config.as_deref())?);
            commands::run_batch(&multi, &config).await?;
        }
        Commands::Extract { file, json } => commands::extract_file(&file, json)?,
        Commands::Regions => commands::print_regions(),
    }

    Ok(())
}
