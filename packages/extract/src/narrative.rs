//! Narrative "highlights" sentences with a per-region breakdown.
//!
//! Recent reports summarize each week in prose:
//!
//! ```text
//! In week 34, the number of new suspected cases is 50, compared with 41
//! in week 33. These were reported from 9 states – Lagos (10), Ogun (5%)
//! and Oyo (1).
//! ```
//!
//! One such sentence may exist for suspected cases and another for
//! confirmed cases. A value followed by `%` is a share of the sentence's
//! total; anything else is a literal count.
//!
//! The region list belongs to the sentence only up to the next sentence
//! opening with "In week", so one case type never picks up the other's list.
//! A list ends at a full stop or a blank line and may wrap across lines.

use std::sync::LazyLock;

use regex::Regex;
use sitrep_geography_models::RegionRegistry;
use sitrep_report_models::{CaseType, ExtractedRow, Week};

use crate::metadata::DocumentContext;
use crate::tally::{COUNT_PATTERN, CaseTally, parse_count, percent_of};

static SUSPECTED_RE: LazyLock<Regex> = LazyLock::new(|| highlight_regex(CaseType::Suspected));
static CONFIRMED_RE: LazyLock<Regex> = LazyLock::new(|| highlight_regex(CaseType::Confirmed));

/// Start of the next highlights sentence.
static NEXT_SENTENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^|\.)\s*In\s+weeks?\b").expect("valid regex"));

/// `reported from 3 states – Lagos (10), Ogun (5%) and Oyo (1).`
static LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)reported\s+from.*?[–:\-]\s*(?P<list>[^.]+?)\s*(?:\.|\n\s*\n|$)")
        .expect("valid regex")
});

/// `Lagos (10)`, `Ogun (5%)`.
static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<region>[A-Za-z][A-Za-z\s\-]*?)\s*\(\s*(?P<value>\d+)\s*(?P<percent>%?)\s*\)")
        .expect("valid regex")
});

/// Connective before the final list item.
static AND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+and\s+").expect("valid regex"));

fn highlight_regex(case_type: CaseType) -> Regex {
    Regex::new(&format!(
        r"(?is)\bIn\s+week\s*(?P<week>\d+)[^.]*?new\s+{case_type}(?:\s+cases)?\s+is\s+(?P<total>{COUNT_PATTERN})"
    ))
    .expect("valid regex")
}

/// One matched highlights sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSentence {
    /// Week named by the sentence.
    pub week: Week,
    /// Total stated for the week; the base for percentages.
    pub total: u32,
    /// Per-region counts from the sentence's list.
    pub tally: CaseTally,
}

/// Finds and parses the highlights sentence for `case_type`.
#[must_use]
pub fn parse_highlight(text: &str, case_type: CaseType) -> Option<HighlightSentence> {
    let re = match case_type {
        CaseType::Suspected => &*SUSPECTED_RE,
        CaseType::Confirmed => &*CONFIRMED_RE,
    };
    let caps = re.captures(text)?;

    let week = caps["week"].parse().map_or(Week::Unknown, Week::Single);
    let total = parse_count(&caps["total"]).unwrap_or_else(|e| {
        log::warn!("Unreadable {case_type} total '{}': {e}", &caps["total"]);
        0
    });

    let rest = &text[caps.get(0).map_or(text.len(), |m| m.end())..];
    let sentence = NEXT_SENTENCE_RE
        .find(rest)
        .map_or(rest, |next| &rest[..next.start()]);
    let tally = LIST_RE
        .captures(sentence)
        .map_or_else(CaseTally::new, |list| parse_list(&list["list"], total, case_type));

    log::debug!(
        "Highlights sentence for {case_type}: week {week}, total {total}, {} regions",
        tally.len()
    );

    Some(HighlightSentence { week, total, tally })
}

fn parse_list(list: &str, total: u32, case_type: CaseType) -> CaseTally {
    let list = AND_RE.replace_all(list.trim(), ", ");

    let mut tally = CaseTally::new();
    for item in list.split(',').map(str::trim) {
        let Some(item_caps) = ITEM_RE.captures(item) else {
            continue;
        };

        let region = item_caps["region"].trim();
        if region.is_empty() {
            continue;
        }

        let value: u32 = match item_caps["value"].parse() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Skipping {case_type} entry '{item}': {e}");
                continue;
            }
        };

        let count = if item_caps["percent"].is_empty() {
            value
        } else {
            percent_of(total, value)
        };
        tally.record(region, count);
    }
    tally
}

/// Builds breakdown rows from the highlights sentences, if either one
/// named at least one region.
#[must_use]
pub fn extract(
    text: &str,
    ctx: &DocumentContext,
    registry: &RegionRegistry,
) -> Option<Vec<ExtractedRow>> {
    let suspected = parse_highlight(text, CaseType::Suspected);
    let confirmed = parse_highlight(text, CaseType::Confirmed);

    let has_breakdown = suspected
        .iter()
        .chain(confirmed.iter())
        .any(|sentence| !sentence.tally.is_empty());
    if !has_breakdown {
        return None;
    }

    let week = suspected
        .as_ref()
        .or(confirmed.as_ref())
        .map_or(ctx.week, |sentence| sentence.week);

    let tally_for = |sentence: Option<HighlightSentence>| {
        sentence.map_or_else(CaseTally::new, |s| s.tally.canonicalize(registry))
    };
    let suspected = tally_for(suspected);
    let confirmed = tally_for(confirmed);

    Some(
        registry
            .names()
            .iter()
            .map(|&region| ExtractedRow {
                year: ctx.year,
                week,
                region: region.to_owned(),
                suspected: suspected.get_or_zero(region),
                confirmed: confirmed.get_or_zero(region),
            })
            .collect(),
    )
}
