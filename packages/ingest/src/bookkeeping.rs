//! Placeholder rows for reporting periods without usable data.
//!
//! A period with no report file gets one zero row per region flagged
//! `missing`; a report that exists but could not be converted gets one
//! zero row per region flagged `not_processed`.

use std::collections::BTreeSet;

use sitrep_geography_models::RegionRegistry;
use sitrep_report_models::{OutputRecord, ReportPeriod};

/// Error attached to rows of periods that have no report file.
pub const MISSING_REPORT_ERROR: &str = "No report file found";

/// Every `(year, week)` from `start_year` week 1 through `end_year` week
/// `weeks_per_year`, in order.
#[must_use]
pub fn expected_periods(start_year: u16, end_year: u16, weeks_per_year: u32) -> Vec<ReportPeriod> {
    (start_year..=end_year)
        .flat_map(|year| (1..=weeks_per_year).map(move |week| ReportPeriod { year, week }))
        .collect()
}

/// The expected periods not covered by any report file.
#[must_use]
pub fn missing_periods(
    expected: &[ReportPeriod],
    present: &BTreeSet<ReportPeriod>,
) -> Vec<ReportPeriod> {
    expected
        .iter()
        .copied()
        .filter(|period| !present.contains(period))
        .collect()
}

/// Zero rows flagged `missing` for each period and region.
#[must_use]
pub fn missing_period_records(
    periods: &[ReportPeriod],
    registry: &RegionRegistry,
) -> Vec<OutputRecord> {
    periods
        .iter()
        .flat_map(|&period| {
            registry
                .names()
                .iter()
                .map(move |region| OutputRecord::missing(period, region, MISSING_REPORT_ERROR))
        })
        .collect()
}

/// Zero rows flagged `not_processed` for a failed report.
#[must_use]
pub fn failed_document_records(
    period: ReportPeriod,
    error: &str,
    registry: &RegionRegistry,
) -> Vec<OutputRecord> {
    registry
        .names()
        .iter()
        .map(|region| OutputRecord::not_processed(period, region, error))
        .collect()
}

#[cfg(test)]
mod tests {
    use sitrep_report_models::Week;

    use super::*;

    const fn period(year: u16, week: u32) -> ReportPeriod {
        ReportPeriod { year, week }
    }

    #[test]
    fn expected_periods_cover_every_week() {
        let periods = expected_periods(2017, 2024, 52);
        assert_eq!(periods.len(), 8 * 52);
        assert_eq!(periods.first(), Some(&period(2017, 1)));
        assert_eq!(periods.last(), Some(&period(2024, 52)));
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(expected_periods(2024, 2017, 52).is_empty());
    }

    #[test]
    fn missing_excludes_present_periods() {
        let expected = expected_periods(2023, 2023, 3);
        let present = BTreeSet::from([period(2023, 2)]);
        assert_eq!(
            missing_periods(&expected, &present),
            vec![period(2023, 1), period(2023, 3)]
        );
    }

    #[test]
    fn missing_records_span_the_registry() {
        let registry = RegionRegistry::nigeria();
        let records = missing_period_records(&[period(2023, 5)], registry);
        assert_eq!(records.len(), registry.len());
        assert!(records.iter().all(|r| r.missing && !r.not_processed));
        assert!(records.iter().all(|r| r.week == Week::Single(5)));
        assert!(records
            .iter()
            .all(|r| r.error.as_deref() == Some(MISSING_REPORT_ERROR)));
    }

    #[test]
    fn failed_records_carry_the_error() {
        let registry = RegionRegistry::new(&["North", "South"]);
        let records = failed_document_records(period(2019, 40), "No extractable text", &registry);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.not_processed && !r.missing));
        assert_eq!(records[0].error.as_deref(), Some("No extractable text"));
        assert_eq!((records[1].suspected, records[1].confirmed), (0, 0));
    }
}
