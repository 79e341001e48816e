#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch processing of a directory of situation reports into one
//! consolidated, sorted CSV.
//!
//! Each report is converted to text ([`sitrep_pdf`]) and run through the
//! extraction engine ([`sitrep_extract`]) on a blocking worker thread.
//! Documents are independent; the merge, bookkeeping and sort happen once
//! all of them have finished.

pub mod bookkeeping;
pub mod config;
pub mod output;
pub mod progress;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt as _};
use sitrep_extract::{Extraction, extract_document};
use sitrep_geography_models::RegionRegistry;
use sitrep_report_models::{ExtractionMode, OutputRecord, ReportPeriod, sort_records};
use tokio::task::JoinError;

use crate::bookkeeping::{
    expected_periods, failed_document_records, missing_period_records, missing_periods,
};
use crate::config::IngestConfig;
use crate::progress::ProgressCallback;

/// Errors that abort a batch run.
///
/// Per-document conversion failures are not errors here; they are recorded
/// in the [`BatchReport`].
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The config file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Lists the files in `dir` whose extension is one of `extensions`
/// (case-insensitive), sorted by path.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the directory cannot be read.
pub fn discover_documents(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, IngestError> {
    let mut paths = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
        if matches {
            paths.push(path);
        }
    }

    paths.sort();
    log::debug!("Found {} documents in {}", paths.len(), dir.display());
    Ok(paths)
}

/// The result of processing one report file.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// File name without directories.
    pub file_name: String,
    /// Reporting period decoded from the file name, if it follows the
    /// `_DDMMYY_N` convention.
    pub period: Option<ReportPeriod>,
    /// Extracted rows, or the reason the document could not be read.
    pub result: Result<Extraction, String>,
}

/// Converts and extracts a single report.
///
/// Conversion failures are captured in [`DocumentOutcome::result`] rather
/// than returned.
#[must_use]
pub fn process_document(path: &Path) -> DocumentOutcome {
    let (file_name, period) = identify(path);

    let result = sitrep_pdf::extract_text(path)
        .map(|text| extract_document(&text, &file_name))
        .map_err(|e| {
            log::error!("Failed to process {file_name}: {e}");
            e.to_string()
        });

    DocumentOutcome {
        file_name,
        period,
        result,
    }
}

fn identify(path: &Path) -> (String, Option<ReportPeriod>) {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let period = sitrep_extract::metadata::report_period_from_filename(&file_name);
    (file_name, period)
}

/// Turns a panicked or cancelled worker into a failed outcome for `path`.
fn joined_outcome(path: &Path, joined: Result<DocumentOutcome, JoinError>) -> DocumentOutcome {
    joined.unwrap_or_else(|e| {
        let (file_name, period) = identify(path);
        log::error!("Worker for {file_name} failed: {e}");
        DocumentOutcome {
            file_name,
            period,
            result: Err(format!("worker task failed: {e}")),
        }
    })
}

/// Summary and output of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Report files found.
    pub documents: usize,
    /// Documents that produced breakdown rows.
    pub breakdown_documents: usize,
    /// Documents that produced a single aggregate row.
    pub aggregate_documents: usize,
    /// `(file name, error)` for documents that could not be converted.
    pub failed: Vec<(String, String)>,
    /// Expected periods with no report file.
    pub missing_periods: Vec<ReportPeriod>,
    /// All rows, sorted by (year, week, region).
    pub records: Vec<OutputRecord>,
}

impl BatchReport {
    /// Documents converted successfully.
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.breakdown_documents + self.aggregate_documents
    }
}

/// Processes every report in `config.input_dir`.
///
/// Up to `config.concurrency` documents are converted at once. When
/// `config.expected` is set, periods without a report file get `missing`
/// rows. Failed documents with a decodable period get `not_processed`
/// rows; failures without one are only listed in
/// [`BatchReport::failed`].
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the input directory cannot be read. A
/// worker that panics only fails its own document.
pub async fn process_directory(
    config: &IngestConfig,
    progress: Arc<dyn ProgressCallback>,
) -> Result<BatchReport, IngestError> {
    let start = Instant::now();
    let registry = RegionRegistry::nigeria();
    let paths = discover_documents(&config.input_dir, &config.extensions)?;
    let concurrency = config.effective_concurrency();

    log::info!(
        "Processing {} documents from {} (concurrency={concurrency})",
        paths.len(),
        config.input_dir.display()
    );
    progress.set_total(paths.len() as u64);

    let mut outcomes: Vec<DocumentOutcome> = stream::iter(paths.into_iter().map(|path| {
        let progress = Arc::clone(&progress);
        async move {
            let worker_path = path.clone();
            let joined =
                tokio::task::spawn_blocking(move || process_document(&worker_path)).await;
            let outcome = joined_outcome(&path, joined);
            progress.set_message(outcome.file_name.clone());
            progress.inc(1);
            outcome
        }
    }))
    .buffer_unordered(concurrency)
    .collect()
    .await;

    outcomes.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    let mut report = BatchReport {
        documents: outcomes.len(),
        ..BatchReport::default()
    };
    let mut present = BTreeSet::new();

    for outcome in outcomes {
        if let Some(period) = outcome.period {
            present.insert(period);
        }

        match outcome.result {
            Ok(extraction) => {
                match extraction.mode {
                    ExtractionMode::Breakdown => report.breakdown_documents += 1,
                    ExtractionMode::Aggregate => report.aggregate_documents += 1,
                }
                report
                    .records
                    .extend(extraction.rows.into_iter().map(OutputRecord::from));
            }
            Err(error) => {
                if let Some(period) = outcome.period {
                    report
                        .records
                        .extend(failed_document_records(period, &error, registry));
                } else {
                    log::warn!(
                        "{}: no reporting period in file name, no placeholder rows written",
                        outcome.file_name
                    );
                }
                report.failed.push((outcome.file_name, error));
            }
        }
    }

    if let Some(expected) = config.expected {
        let expected = expected_periods(
            expected.start_year,
            expected.end_year,
            expected.weeks_per_year,
        );
        report.missing_periods = missing_periods(&expected, &present);
        report
            .records
            .extend(missing_period_records(&report.missing_periods, registry));
    }

    sort_records(&mut report.records);

    let summary = format!(
        "{} documents ({} failed), {} missing periods, {} rows in {:.1}s",
        report.documents,
        report.failed.len(),
        report.missing_periods.len(),
        report.records.len(),
        start.elapsed().as_secs_f64()
    );
    log::info!("Batch complete: {summary}");
    progress.finish(summary);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use sitrep_report_models::{OVERALL_REGION, Week};

    use super::*;
    use crate::config::ExpectedRange;
    use crate::progress::null_progress;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "sitrep_ingest_{name}_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    fn config(dir: &Path, expected: Option<ExpectedRange>) -> IngestConfig {
        IngestConfig {
            input_dir: dir.to_path_buf(),
            output: dir.join("out.csv"),
            concurrency: 2,
            expected,
            ..IngestConfig::default()
        }
    }

    #[test]
    fn discovers_matching_extensions_sorted() {
        let dir = temp_dir("discover");
        write(&dir, "b_010123_2.TXT", "");
        write(&dir, "a_010123_1.txt", "");
        write(&dir, "notes.md", "");
        std::fs::create_dir_all(dir.join("nested.txt")).unwrap();

        let found = discover_documents(&dir, &["txt".to_owned()]).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_010123_1.txt", "b_010123_2.TXT"]);
    }

    #[test]
    fn discover_reports_unreadable_directory() {
        let missing = std::env::temp_dir().join("sitrep_ingest_no_such_dir");
        assert!(matches!(
            discover_documents(&missing, &["pdf".to_owned()]),
            Err(IngestError::Io(_))
        ));
    }

    #[test]
    fn process_document_captures_failures() {
        let dir = temp_dir("failure");
        write(&dir, "Nigeria_090323_11.pdf", "not really a pdf");

        let outcome = process_document(&dir.join("Nigeria_090323_11.pdf"));
        assert_eq!(outcome.file_name, "Nigeria_090323_11.pdf");
        assert_eq!(outcome.period, Some(ReportPeriod { year: 2023, week: 11 }));
        assert!(outcome.result.is_err());
    }

    #[tokio::test]
    async fn panicked_worker_fails_only_its_document() {
        let path = PathBuf::from("reports/Nigeria_090323_11.pdf");
        let joined = tokio::task::spawn_blocking(|| -> DocumentOutcome {
            panic!("font table out of range")
        })
        .await;

        let outcome = joined_outcome(&path, joined);
        assert_eq!(outcome.file_name, "Nigeria_090323_11.pdf");
        assert_eq!(outcome.period, Some(ReportPeriod { year: 2023, week: 11 }));
        assert!(outcome.result.unwrap_err().starts_with("worker task failed"));
    }

    #[tokio::test]
    async fn batch_merges_documents_and_bookkeeping() {
        let dir = temp_dir("batch");
        write(
            &dir,
            "Nigeria_100123_1.txt",
            "In weeks 1 2023, 120 new suspected cases were reported.",
        );
        write(
            &dir,
            "Nigeria_170123_2.txt",
            "Epi week 2 2023\n\nLagos 12 3\nKano 4 0",
        );
        write(&dir, "Nigeria_240123_3.pdf", "corrupt");
        write(&dir, "undated.pdf", "corrupt");

        let expected = ExpectedRange {
            start_year: 2023,
            end_year: 2023,
            weeks_per_year: 4,
        };
        let report = process_directory(&config(&dir, Some(expected)), null_progress())
            .await
            .unwrap();
        let registry = RegionRegistry::nigeria();

        assert_eq!(report.documents, 4);
        assert_eq!(report.aggregate_documents, 1);
        assert_eq!(report.breakdown_documents, 1);
        assert_eq!(report.processed(), 2);
        assert_eq!(report.failed.len(), 2);
        assert_eq!(
            report.missing_periods,
            vec![ReportPeriod { year: 2023, week: 4 }]
        );

        // 1 aggregate + a breakdown + a failed week + a missing week
        assert_eq!(report.records.len(), 1 + registry.len() * 3);

        let week1: Vec<_> = report
            .records
            .iter()
            .filter(|r| r.week == Week::Single(1))
            .collect();
        assert_eq!(week1.len(), 1);
        assert_eq!(week1[0].region, OVERALL_REGION);
        assert_eq!(week1[0].suspected, 120);

        let lagos = report
            .records
            .iter()
            .find(|r| r.week == Week::Single(2) && r.region == "Lagos")
            .unwrap();
        assert_eq!((lagos.suspected, lagos.confirmed), (12, 3));

        assert!(report
            .records
            .iter()
            .filter(|r| r.week == Week::Single(3))
            .all(|r| r.not_processed && r.error.is_some()));
        assert!(report
            .records
            .iter()
            .filter(|r| r.week == Week::Single(4))
            .all(|r| r.missing));

        let keys: Vec<_> = report
            .records
            .iter()
            .map(|r| (r.year, r.week, r.region.clone()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[derive(Default)]
    struct RecordingProgress {
        messages: std::sync::Mutex<Vec<String>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn set_total(&self, _total: u64) {}
        fn inc(&self, _delta: u64) {}
        fn set_message(&self, msg: String) {
            self.messages.lock().unwrap().push(msg);
        }
        fn finish(&self, _msg: String) {}
    }

    #[tokio::test]
    async fn progress_names_each_finished_document() {
        let dir = temp_dir("progress");
        write(&dir, "Nigeria_100123_1.txt", "Lagos 1 1");
        write(&dir, "Nigeria_170123_2.txt", "Kano 2 0");

        let progress = Arc::new(RecordingProgress::default());
        process_directory(&config(&dir, None), progress.clone())
            .await
            .unwrap();

        let mut messages = progress.messages.lock().unwrap().clone();
        messages.sort();
        assert_eq!(messages, vec!["Nigeria_100123_1.txt", "Nigeria_170123_2.txt"]);
    }

    #[tokio::test]
    async fn no_expected_range_means_no_missing_rows() {
        let dir = temp_dir("no_expected");
        write(&dir, "Nigeria_100123_1.txt", "Lagos 1 1");

        let report = process_directory(&config(&dir, None), null_progress())
            .await
            .unwrap();
        assert!(report.missing_periods.is_empty());
        assert!(report.records.iter().all(|r| !r.missing));
        assert_eq!(report.records.len(), RegionRegistry::nigeria().len());
    }
}
