//! Actions shared by the subcommands and the interactive menu.

use std::path::{Path, PathBuf};

use sitrep_cli_utils::{IndicatifProgress, MultiProgress};
use sitrep_geography_models::RegionRegistry;
use sitrep_ingest::config::IngestConfig;
use sitrep_ingest::output::{write_csv, write_rows};
use sitrep_ingest::{BatchReport, process_directory};

/// Values that override the config file for one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub no_missing: bool,
}

impl RunOverrides {
    /// Applies the overrides on top of `config`.
    #[must_use]
    pub fn apply(&self, mut config: IngestConfig) -> IngestConfig {
        if let Some(input) = &self.input {
            config.input_dir.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if self.no_missing {
            config.expected = None;
        }
        config
    }
}

/// Processes a directory and writes the consolidated CSV.
///
/// # Errors
///
/// Returns an error if the input directory cannot be read or the output
/// cannot be written.
pub async fn run_batch(
    multi: &MultiProgress,
    config: &IngestConfig,
) -> Result<BatchReport, Box<dyn std::error::Error>> {
    let progress = IndicatifProgress::documents_bar(multi, "Extracting reports");
    let report = process_directory(config, progress).await?;
    write_csv(&config.output, &report.records)?;

    print_summary(&report, &config.output);
    Ok(report)
}

fn print_summary(report: &BatchReport, output: &Path) {
    println!();
    println!("Documents:        {}", report.documents);
    println!("  breakdown:      {}", report.breakdown_documents);
    println!("  aggregate:      {}", report.aggregate_documents);
    println!("  failed:         {}", report.failed.len());
    println!("Missing periods:  {}", report.missing_periods.len());
    println!("Rows written:     {} -> {}", report.records.len(), output.display());

    if !report.failed.is_empty() {
        println!();
        println!("Failed documents:");
        for (file_name, error) in &report.failed {
            println!("  {file_name}: {error}");
        }
    }
}

/// Extracts one report and prints its rows to stdout.
///
/// # Errors
///
/// Returns an error if the file cannot be converted to text or the rows
/// cannot be written.
pub fn extract_file(path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = sitrep_pdf::extract_text(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extraction = sitrep_extract::extract_document(&text, &file_name);

    if json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
    } else {
        log::info!(
            "{file_name}: {} strategy, {} mode",
            extraction.strategy,
            extraction.mode
        );
        write_rows(std::io::stdout().lock(), &extraction.rows)?;
    }

    Ok(())
}

/// Prints the canonical region names, one per line.
pub fn print_regions() {
    let registry = RegionRegistry::nigeria();
    for name in registry.names() {
        println!("{name}");
    }
    println!("{}", "-".repeat(20));
    println!("{} regions", registry.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_overrides_keeps_config() {
        let config = IngestConfig::default();
        assert_eq!(RunOverrides::default().apply(config.clone()), config);
    }

    #[test]
    fn overrides_replace_file_values() {
        let overrides = RunOverrides {
            input: Some(PathBuf::from("reports/2023")),
            output: Some(PathBuf::from("out.csv")),
            concurrency: Some(1),
            no_missing: true,
        };
        let config = overrides.apply(IngestConfig::default());
        assert_eq!(config.input_dir, PathBuf::from("reports/2023"));
        assert_eq!(config.output, PathBuf::from("out.csv"));
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.expected, None);
        assert_eq!(config.extensions, vec!["pdf", "txt"]);
    }
}
