#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Case-count extraction from converted situation-report text.
//!
//! A document is run through an ordered chain of strategies and the first
//! one that produces rows wins:
//!
//! 1. [`narrative`]: "highlights" sentences with a per-region list.
//! 2. [`aggregate`]: sentences that only give a national total.
//! 3. [`tabular`]: per-segment summary/table parsing, skipping
//!    [`cumulative`] multi-year segments.
//!
//! The winning rows are then passed through [`reconcile::reconcile`], which
//! guarantees either one row per registry region or a single
//! [`OVERALL_REGION`](sitrep_report_models::OVERALL_REGION) row.

pub mod aggregate;
pub mod cumulative;
pub mod metadata;
pub mod narrative;
pub mod reconcile;
pub mod tabular;
pub mod tally;

use serde::Serialize;
use sitrep_geography_models::RegionRegistry;
use sitrep_report_models::{ExtractedRow, ExtractionMode};
use strum_macros::{AsRefStr, Display, EnumString};

pub use metadata::DocumentContext;
pub use reconcile::reconcile;
pub use tally::CaseTally;

/// The strategy whose output was used for a document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    /// Highlights sentence with a per-region list.
    Narrative,
    /// National total only.
    Aggregate,
    /// Segment-based table or summary parsing.
    Tabular,
}

/// The reconciled result for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Which strategy produced the rows.
    pub strategy: Strategy,
    /// Breakdown or aggregate.
    pub mode: ExtractionMode,
    /// Final rows, sorted by (year, week, region).
    pub rows: Vec<ExtractedRow>,
}

/// Extracts rows from `text` against the Nigerian state registry.
///
/// `file_name` supplies the year and week when the text does not.
#[must_use]
pub fn extract_document(text: &str, file_name: &str) -> Extraction {
    extract_document_with(text, file_name, RegionRegistry::nigeria())
}

/// Extracts rows from `text` against an arbitrary region registry.
#[must_use]
pub fn extract_document_with(
    text: &str,
    file_name: &str,
    registry: &RegionRegistry,
) -> Extraction {
    let ctx = DocumentContext::new(text, file_name);
    log::debug!(
        "[{}] Context: year={:?} week={}",
        ctx.source,
        ctx.year,
        ctx.week
    );

    let (strategy, rows) = if let Some(rows) = narrative::extract(text, &ctx, registry) {
        (Strategy::Narrative, rows)
    } else if let Some(row) = aggregate::extract(text, &ctx) {
        (Strategy::Aggregate, vec![row])
    } else {
        (Strategy::Tabular, tabular::extract(text, &ctx))
    };

    let rows = reconcile(rows, &ctx, registry);
    let mode = if rows.len() == 1 && rows[0].is_overall() {
        ExtractionMode::Aggregate
    } else {
        ExtractionMode::Breakdown
    };

    log::info!(
        "[{}] Extracted {} rows ({strategy}, {mode})",
        ctx.source,
        rows.len()
    );

    Extraction {
        strategy,
        mode,
        rows,
    }
}
