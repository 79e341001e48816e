//! Menu-driven front end for running `sitrep` without memorizing flags.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use sitrep_cli_utils::MultiProgress;
use sitrep_ingest::config::IngestConfig;

use crate::commands::{self, RunOverrides};

/// Top-level actions available in the menu.
enum Action {
    ProcessDirectory,
    ExtractFile,
    ListRegions,
}

impl Action {
    const ALL: &[Self] = &[Self::ProcessDirectory, Self::ExtractFile, Self::ListRegions];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::ProcessDirectory => "Process a directory of reports",
            Self::ExtractFile => "Extract a single report",
            Self::ListRegions => "List regions",
        }
    }
}

/// Prompts for an action and its inputs, then runs it.
///
/// # Errors
///
/// Returns an error if a prompt fails or the selected action fails.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("Situation Report Extraction");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::ProcessDirectory => process_directory(multi).await?,
        Action::ExtractFile => {
            let file: String = Input::new()
                .with_prompt("Report file")
                .interact_text()?;
            let json = Confirm::new()
                .with_prompt("Print as JSON?")
                .default(false)
                .interact()?;
            commands::extract_file(&PathBuf::from(file.trim()), json)?;
        }
        Action::ListRegions => commands::print_regions(),
    }

    Ok(())
}

async fn process_directory(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = IngestConfig::load_or_default(None)?;

    let input: String = Input::new()
        .with_prompt("Report directory")
        .default(defaults.input_dir.display().to_string())
        .interact_text()?;
    let output: String = Input::new()
        .with_prompt("Output CSV")
        .default(defaults.output.display().to_string())
        .interact_text()?;
    let concurrency_str: String = Input::new()
        .with_prompt("Documents in parallel")
        .default(defaults.concurrency.to_string())
        .interact_text()?;
    let concurrency = concurrency_str.trim().parse().unwrap_or(defaults.concurrency);

    let add_missing = defaults.expected.is_some()
        && Confirm::new()
            .with_prompt("Add placeholder rows for weeks without a report?")
            .default(true)
            .interact()?;

    let overrides = RunOverrides {
        input: Some(PathBuf::from(input.trim())),
        output: Some(PathBuf::from(output.trim())),
        concurrency: Some(concurrency),
        no_missing: !add_missing,
    };
    commands::run_batch(multi, &overrides.apply(defaults)).await?;

    Ok(())
}
