//! Year and week lookups from report text and file names.
//!
//! Every function here is a pure pattern lookup. A failed lookup is an
//! ordinary value (`None` or [`Week::Unknown`]), never an error.

use std::sync::LazyLock;

use chrono::{Datelike as _, NaiveDate};
use regex::Regex;
use sitrep_report_models::{ReportPeriod, Week};

/// A calendar year token in the surveillance era.
pub(crate) static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").expect("valid regex"));

/// A week number or range, tolerating spaces around the hyphen: `13 - 16`.
pub(crate) const WEEK_PATTERN: &str = r"\d+(?:\s*-\s*\d+)?";

/// `week 6`, `Week: 22`, `epi week 34`, `weeks 13-16`.
static WEEK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:epi\s*)?weeks?\s*[:\-]?\s*({WEEK_PATTERN})"
    ))
    .expect("valid regex")
});

/// The last number directly before the extension: `..._090323_11.pdf`.
static FILENAME_WEEK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.[A-Za-z0-9]+$").expect("valid regex"));

/// `_DDMMYY_N.ext`, the corpus naming convention.
static FILENAME_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_(\d{2})(\d{2})(\d{2})_(\d+)\.[A-Za-z0-9]+$").expect("valid regex")
});

/// Returns the first `20xx` year token in `text`.
#[must_use]
pub fn extract_year(text: &str) -> Option<u16> {
    YEAR_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Returns the first week label + number (or range) in `text`.
#[must_use]
pub fn extract_week(text: &str) -> Week {
    WEEK_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(Week::Unknown)
}

/// Returns the final number immediately preceding the file extension.
#[must_use]
pub fn week_from_filename(name: &str) -> Week {
    FILENAME_WEEK_RE
        .captures(name.trim())
        .and_then(|caps| caps[1].parse().ok())
        .map_or(Week::Unknown, Week::Single)
}

/// Decodes the publication date from a `_DDMMYY_N.ext` file name.
#[must_use]
pub fn report_date_from_filename(name: &str) -> Option<NaiveDate> {
    let caps = FILENAME_DATE_RE.captures(name.trim())?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

/// Decodes the (year, week) reporting period from a `_DDMMYY_N.ext` file
/// name.
#[must_use]
pub fn report_period_from_filename(name: &str) -> Option<ReportPeriod> {
    let date = report_date_from_filename(name)?;
    let week = FILENAME_DATE_RE.captures(name.trim())?[4].parse().ok()?;
    Some(ReportPeriod {
        year: u16::try_from(date.year()).ok()?,
        week,
    })
}

/// Per-document metadata shared by every extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContext {
    /// Year from the text, else from the file name's date.
    pub year: Option<u16>,
    /// Week from the text; may still be [`Week::Unknown`].
    pub week: Week,
    /// File name the text came from.
    pub source: String,
}

impl DocumentContext {
    /// Derives the context for one document.
    #[must_use]
    pub fn new(text: &str, file_name: &str) -> Self {
        let year = extract_year(text).or_else(|| {
            report_date_from_filename(file_name).and_then(|date| u16::try_from(date.year()).ok())
        });

        Self {
            year,
            week: extract_week(text),
            source: file_name.to_owned(),
        }
    }

    /// The last-resort week derived from the file name.
    #[must_use]
    pub fn filename_week(&self) -> Week {
        week_from_filename(&self.source)
    }
}
