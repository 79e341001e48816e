//! Detection of multi-year cumulative summaries.
//!
//! Reports often close with a "cumulative cases since 2017" table. Those
//! counts span several years and must never be read as a single week's data.
//! A segment is only flagged when the cumulative keyword appears together
//! with at least two distinct years; "cumulative for 2023" alone is fine.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::metadata::YEAR_RE;

static CUMULATIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)cumulative").expect("valid regex"));

/// Whether `segment` describes cumulative totals across several years.
#[must_use]
pub fn is_cumulative_multiyear(segment: &str) -> bool {
    if !CUMULATIVE_RE.is_match(segment) {
        return false;
    }

    let years: BTreeSet<&str> = YEAR_RE
        .find_iter(segment)
        .map(|m| m.as_str())
        .collect();

    years.len() >= 2
}
