//! Narrative sentences that only state a national total.
//!
//! Some multi-week reports have no per-region list at all:
//! "In weeks 13-16 2024, 120 new suspected cases were reported ...". These
//! produce a single [`OVERALL_REGION`] row.

use std::sync::LazyLock;

use regex::Regex;
use sitrep_report_models::{CaseType, ExtractedRow, OVERALL_REGION, Week};

use crate::metadata::{DocumentContext, WEEK_PATTERN};
use crate::tally::{COUNT_PATTERN, parse_count};

static SUSPECTED_RE: LazyLock<Regex> = LazyLock::new(|| total_regex(CaseType::Suspected));
static CONFIRMED_RE: LazyLock<Regex> = LazyLock::new(|| total_regex(CaseType::Confirmed));

fn total_regex(case_type: CaseType) -> Regex {
    Regex::new(&format!(
        r"(?is)\bIn\s+weeks?\s*(?P<week>{WEEK_PATTERN}).*?(?P<total>{COUNT_PATTERN})\s+new\s+{case_type}(?:\s+cases)?"
    ))
    .expect("valid regex")
}

/// A matched national total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateTotal {
    /// Week or week range the total covers.
    pub week: Week,
    /// New cases over that period.
    pub total: u32,
}

/// Finds the national total sentence for `case_type`.
#[must_use]
pub fn parse_total(text: &str, case_type: CaseType) -> Option<AggregateTotal> {
    let re = match case_type {
        CaseType::Suspected => &*SUSPECTED_RE,
        CaseType::Confirmed => &*CONFIRMED_RE,
    };
    let caps = re.captures(text)?;

    let total = match parse_count(&caps["total"]) {
        Ok(total) => total,
        Err(e) => {
            log::warn!("Skipping {case_type} total '{}': {e}", &caps["total"]);
            return None;
        }
    };

    Some(AggregateTotal {
        week: caps["week"].parse().unwrap_or(Week::Unknown),
        total,
    })
}

/// Builds the single aggregate row, if either total was found.
#[must_use]
pub fn extract(text: &str, ctx: &DocumentContext) -> Option<ExtractedRow> {
    let suspected = parse_total(text, CaseType::Suspected);
    let confirmed = parse_total(text, CaseType::Confirmed);
    if suspected.is_none() && confirmed.is_none() {
        return None;
    }

    let week = suspected
        .map_or(Week::Unknown, |s| s.week)
        .or_else(|| confirmed.map_or(Week::Unknown, |c| c.week))
        .or_else(|| ctx.week);

    Some(ExtractedRow {
        year: ctx.year,
        week,
        region: OVERALL_REGION.to_owned(),
        suspected: suspected.map_or(0, |s| s.total),
        confirmed: confirmed.map_or(0, |c| c.total),
    })
}
