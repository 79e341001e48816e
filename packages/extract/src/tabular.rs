//! Segment-based fallback for tabular and labelled-summary layouts.
//!
//! Older reports carry the per-state numbers in a table which text
//! conversion flattens into lines such as `Lagos 12 3`, or in summary
//! paragraphs such as `Lagos: suspected cases 1,204; confirmed cases 87`.
//! The text is split into blank-line-delimited segments; within each
//! segment the labelled form is tried first and the raw line form only
//! when the labelled form found nothing.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use sitrep_report_models::ExtractedRow;

use crate::cumulative::is_cumulative_multiyear;
use crate::metadata::DocumentContext;
use crate::tally::{COUNT_PATTERN, parse_count};

static SEGMENT_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?P<region>[A-Za-z\s]+)[\s:,\-]+suspected\s*cases?[:\-]?\s*(?P<suspected>{COUNT_PATTERN})[\s,;\-]+confirmed\s*cases?[:\-]?\s*(?P<confirmed>{COUNT_PATTERN})"
    ))
    .expect("valid regex")
});

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<region>[A-Za-z\s]+)[,\s]+(?P<suspected>{COUNT_PATTERN})[,\s]+(?P<confirmed>{COUNT_PATTERN})$"
    ))
    .expect("valid regex")
});

/// Splits `text` into blank-line-delimited segments.
#[must_use]
pub fn split_segments(text: &str) -> Vec<&str> {
    SEGMENT_BREAK_RE
        .split(text)
        .filter(|segment| !segment.trim().is_empty())
        .collect()
}

/// Builds a row from one match, or `None` (logged) if a count does not
/// convert.
fn row_from_captures(caps: &Captures<'_>, ctx: &DocumentContext) -> Option<ExtractedRow> {
    let region = caps["region"].trim();
    let parsed = parse_count(&caps["suspected"])
        .and_then(|suspected| parse_count(&caps["confirmed"]).map(|c| (suspected, c)));

    match parsed {
        Ok((suspected, confirmed)) => Some(ExtractedRow {
            year: ctx.year,
            week: ctx.week,
            region: region.to_owned(),
            suspected,
            confirmed,
        }),
        Err(e) => {
            log::warn!(
                "[{}] Conversion error for region '{region}': {e}",
                ctx.source
            );
            None
        }
    }
}

/// Extracts rows from a single segment.
#[must_use]
pub fn extract_segment(segment: &str, ctx: &DocumentContext) -> Vec<ExtractedRow> {
    let mut matched = false;
    let mut rows = Vec::new();

    for caps in SUMMARY_RE.captures_iter(segment) {
        matched = true;
        rows.extend(row_from_captures(&caps, ctx));
    }

    if !matched {
        for line in segment.lines().map(str::trim) {
            if let Some(caps) = LINE_RE.captures(line) {
                rows.extend(row_from_captures(&caps, ctx));
            }
        }
    }

    rows
}

/// Runs the fallback over every non-cumulative segment of `text`.
#[must_use]
pub fn extract(text: &str, ctx: &DocumentContext) -> Vec<ExtractedRow> {
    let mut rows = Vec::new();

    for segment in split_segments(text) {
        if is_cumulative_multiyear(segment) {
            log::debug!(
                "[{}] Skipping segment with cumulative multi-year data",
                ctx.source
            );
            continue;
        }
        rows.extend(extract_segment(segment, ctx));
    }

    if rows.is_empty() {
        log::warn!("[{}] No tabular rows found", ctx.source);
    }

    rows
}
