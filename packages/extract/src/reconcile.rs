//! Final normalization of a document's rows.

use sitrep_geography_models::RegionRegistry;
use sitrep_report_models::{ExtractedRow, sort_rows};

use crate::metadata::DocumentContext;

/// Normalizes whatever an extractor produced into a complete row set.
///
/// A lone [`sitrep_report_models::OVERALL_REGION`] row is returned as is.
/// Anything else is treated as a breakdown: regions are mapped to their
/// canonical registry spelling (unrecognized ones are dropped with a
/// warning), and every registry region that is still absent gets a zero
/// row. `Unknown` weeks fall back to the file name, and the result is
/// sorted by `(year, week, region)`.
#[must_use]
pub fn reconcile(
    rows: Vec<ExtractedRow>,
    ctx: &DocumentContext,
    registry: &RegionRegistry,
) -> Vec<ExtractedRow> {
    if rows.len() == 1 && rows[0].is_overall() {
        let mut rows = rows;
        resolve_unknown_weeks(&mut rows, ctx);
        return rows;
    }

    let mut reconciled: Vec<ExtractedRow> = rows
        .into_iter()
        .filter_map(|mut row| {
            if row.region.trim().is_empty() {
                log::warn!("[{}] Dropping row without a region: {row:?}", ctx.source);
                return None;
            }
            let Some(name) = registry.resolve(&row.region) else {
                log::warn!(
                    "[{}] Dropping row for unrecognized region '{}'",
                    ctx.source,
                    row.region
                );
                return None;
            };
            name.clone_into(&mut row.region);
            Some(row)
        })
        .collect();

    let missing = registry.missing(reconciled.iter().map(|row| row.region.as_str()));
    if !missing.is_empty() {
        log::debug!(
            "[{}] Filling {} regions with zero counts",
            ctx.source,
            missing.len()
        );
    }
    reconciled.extend(
        missing
            .into_iter()
            .map(|region| ExtractedRow::zero(ctx.year, ctx.week, region)),
    );

    resolve_unknown_weeks(&mut reconciled, ctx);
    sort_rows(&mut reconciled);
    reconciled
}

fn resolve_unknown_weeks(rows: &mut [ExtractedRow], ctx: &DocumentContext) {
    for row in rows.iter_mut().filter(|row| row.week.is_unknown()) {
        row.week = ctx.filename_week();
    }
}

#[cfg(test)]
mod tests {
    use sitrep_report_models::{OVERALL_REGION, Week};

    use super::*;

    fn row(region: &str, suspected: u32, confirmed: u32) -> ExtractedRow {
        ExtractedRow {
            year: Some(2023),
            week: Week::Single(11),
            region: region.to_owned(),
            suspected,
            confirmed,
        }
    }

    fn ctx(text: &str) -> DocumentContext {
        DocumentContext::new(text, "An Update of Monkeypox Outbreak in Nigeria_090323_11.pdf")
    }

    #[test]
    fn overall_row_passes_through() {
        let overall = row(OVERALL_REGION, 120, 4);
        let rows = reconcile(vec![overall.clone()], &ctx("week 11"), RegionRegistry::nigeria());
        assert_eq!(rows, vec![overall]);
    }

    #[test]
    fn overall_row_still_gets_filename_week() {
        let mut overall = row(OVERALL_REGION, 1, 0);
        overall.week = Week::Unknown;
        let rows = reconcile(vec![overall], &ctx(""), RegionRegistry::nigeria());
        assert_eq!(rows[0].week, Week::Single(11));
    }

    #[test]
    fn completes_partial_breakdown() {
        let registry = RegionRegistry::nigeria();
        let rows = reconcile(
            vec![row("lagos", 12, 3), row("Summary by state\nCross River", 4, 1)],
            &ctx("2023 epi week 11"),
            registry,
        );

        assert_eq!(rows.len(), registry.len());
        let lagos = rows.iter().find(|r| r.region == "Lagos").unwrap();
        assert_eq!((lagos.suspected, lagos.confirmed), (12, 3));
        let cross_river = rows.iter().find(|r| r.region == "Cross River").unwrap();
        assert_eq!((cross_river.suspected, cross_river.confirmed), (4, 1));
        let kano = rows.iter().find(|r| r.region == "Kano").unwrap();
        assert_eq!((kano.suspected, kano.confirmed), (0, 0));
        assert_eq!(kano.year, Some(2023));
        assert_eq!(kano.week, Week::Single(11));
    }

    #[test]
    fn drops_unrecognized_and_empty_regions() {
        let registry = RegionRegistry::nigeria();
        let rows = reconcile(
            vec![row("Total", 99, 9), row("  ", 1, 1), row("Oyo", 2, 0)],
            &ctx("week 11"),
            registry,
        );
        assert_eq!(rows.len(), registry.len());
        assert!(rows.iter().all(|r| registry.contains(&r.region)));
        assert_eq!(rows.iter().map(|r| r.suspected).sum::<u32>(), 2);
    }

    #[test]
    fn no_rows_becomes_all_zero_breakdown() {
        let registry = RegionRegistry::nigeria();
        let rows = reconcile(Vec::new(), &ctx(""), registry);
        assert_eq!(rows.len(), registry.len());
        assert!(rows.iter().all(|r| r.suspected == 0 && r.confirmed == 0));
        assert!(rows.iter().all(|r| r.week == Week::Single(11)));
    }

    #[test]
    fn unknown_week_stays_unknown_without_filename_hint() {
        let ctx = DocumentContext::new("", "report.pdf");
        let rows = reconcile(Vec::new(), &ctx, RegionRegistry::nigeria());
        assert!(rows.iter().all(|r| r.week == Week::Unknown));
    }

    #[test]
    fn output_is_sorted_by_region() {
        let rows = reconcile(
            vec![row("Zamfara", 1, 0), row("Abia", 1, 0)],
            &ctx("week 11 2023"),
            RegionRegistry::nigeria(),
        );
        let regions: Vec<&str> = rows.iter().map(|r| r.region.as_str()).collect();
        let mut sorted = regions.clone();
        sorted.sort_unstable();
        assert_eq!(regions, sorted);
    }
}
