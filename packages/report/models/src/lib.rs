#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Row types shared by the extraction engine and the batch tooling.
//!
//! The extraction engine produces [`ExtractedRow`]s, one per region per
//! report (or a single [`OVERALL_REGION`] row when a report only states a
//! national total). The batch layer widens them into [`OutputRecord`]s,
//! which additionally carry the missing/not-processed bookkeeping flags.

mod week;

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use week::{InvalidWeekError, UNKNOWN_WEEK, Week};

/// Region sentinel used when a report has no per-region breakdown.
pub const OVERALL_REGION: &str = "Overall";

/// The two case classifications reported in a situation report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CaseType {
    /// Cases meeting the suspected case definition.
    Suspected,
    /// Laboratory-confirmed cases.
    Confirmed,
}

/// Which shape a document's rows take.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExtractionMode {
    /// Exactly one row per registry region.
    Breakdown,
    /// A single [`OVERALL_REGION`] row.
    Aggregate,
}

/// One observation: case counts for a region in a reporting week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRow {
    /// Report year. `None` when neither the text nor the file name
    /// contained one.
    pub year: Option<u16>,
    /// Reporting week or week range.
    pub week: Week,
    /// Canonical region name, or [`OVERALL_REGION`].
    pub region: String,
    /// Suspected case count.
    pub suspected: u32,
    /// Confirmed case count.
    pub confirmed: u32,
}

impl ExtractedRow {
    /// A zero-count row for `region`.
    #[must_use]
    pub fn zero(year: Option<u16>, week: Week, region: &str) -> Self {
        Self {
            year,
            week,
            region: region.to_owned(),
            suspected: 0,
            confirmed: 0,
        }
    }

    /// Whether this is an aggregate-mode row.
    #[must_use]
    pub fn is_overall(&self) -> bool {
        self.region == OVERALL_REGION
    }
}

/// Sorts rows by (year, week, region). Rows with identical keys keep their
/// relative order and are not merged.
pub fn sort_rows(rows: &mut [ExtractedRow]) {
    rows.sort_by(|a, b| {
        (a.year, a.week, a.region.as_str()).cmp(&(b.year, b.week, b.region.as_str()))
    });
}

/// A (year, week) reporting period, as encoded in report file names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ReportPeriod {
    /// Calendar year.
    pub year: u16,
    /// Epi week number.
    pub week: u32,
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// A row as written to the consolidated output file.
///
/// The first five fields mirror [`ExtractedRow`]; the rest are batch-level
/// bookkeeping that the extraction engine never sets itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Report year.
    pub year: Option<u16>,
    /// Reporting week or week range.
    pub week: Week,
    /// Canonical region name, or [`OVERALL_REGION`].
    pub region: String,
    /// Suspected case count.
    pub suspected: u32,
    /// Confirmed case count.
    pub confirmed: u32,
    /// No report file existed for this period.
    pub missing: bool,
    /// A report file existed but could not be converted to text.
    pub not_processed: bool,
    /// Why the row is a placeholder, if it is one.
    pub error: Option<String>,
}

impl OutputRecord {
    /// A zero-count placeholder row for a period with no report file.
    #[must_use]
    pub fn missing(period: ReportPeriod, region: &str, error: &str) -> Self {
        Self {
            missing: true,
            error: Some(error.to_owned()),
            ..Self::placeholder(period, region)
        }
    }

    /// A zero-count placeholder row for a report that failed to convert.
    #[must_use]
    pub fn not_processed(period: ReportPeriod, region: &str, error: &str) -> Self {
        Self {
            not_processed: true,
            error: Some(error.to_owned()),
            ..Self::placeholder(period, region)
        }
    }

    fn placeholder(period: ReportPeriod, region: &str) -> Self {
        Self {
            year: Some(period.year),
            week: Week::Single(period.week),
            region: region.to_owned(),
            suspected: 0,
            confirmed: 0,
            missing: false,
            not_processed: false,
            error: None,
        }
    }
}

impl From<ExtractedRow> for OutputRecord {
    fn from(row: ExtractedRow) -> Self {
        Self {
            year: row.year,
            week: row.week,
            region: row.region,
            suspected: row.suspected,
            confirmed: row.confirmed,
            missing: false,
            not_processed: false,
            error: None,
        }
    }
}

/// Sorts output records by (year, week, region).
pub fn sort_records(records: &mut [OutputRecord]) {
    records.sort_by(|a, b| {
        (a.year, a.week, a.region.as_str()).cmp(&(b.year, b.week, b.region.as_str()))
    });
}
