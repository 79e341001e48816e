//! Per-region count accumulation and count-token parsing.

use std::collections::BTreeMap;
use std::num::ParseIntError;

use sitrep_geography_models::{RegionRegistry, normalize_key};

/// A count with optional thousands separators, e.g. `1,234` or `57`.
pub(crate) const COUNT_PATTERN: &str = r"\d{1,3}(?:,\d{3})+|\d+";

/// Parses a count token, ignoring thousands separators.
///
/// # Errors
///
/// Returns the integer parse error when the token is not a non-negative
/// count that fits in a `u32`.
pub fn parse_count(raw: &str) -> Result<u32, ParseIntError> {
    raw.trim().replace(',', "").parse()
}

/// `percent` % of `total`, rounded half away from zero.
#[must_use]
pub fn percent_of(total: u32, percent: u32) -> u32 {
    let scaled = u64::from(total) * u64::from(percent);
    u32::try_from((scaled + 50) / 100).unwrap_or(u32::MAX)
}

/// Region → count mapping for one case type.
///
/// Keys are normalized (lowercase, single-spaced) so prose spellings like
/// `"akwa  ibom"` and `"Akwa Ibom"` land on the same entry. Reading never
/// inserts; an absent region simply counts as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseTally {
    counts: BTreeMap<String, u32>,
}

impl CaseTally {
    /// Creates an empty tally.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Sets the count for `region`, replacing any earlier mention.
    pub fn record(&mut self, region: &str, count: u32) {
        self.counts.insert(normalize_key(region), count);
    }

    /// The count for `region`, or 0 if it was never recorded.
    #[must_use]
    pub fn get_or_zero(&self, region: &str) -> u32 {
        self.counts.get(&normalize_key(region)).copied().unwrap_or(0)
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct regions recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Recorded `(normalized region, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(region, &count)| (region.as_str(), count))
    }

    /// Re-keys the tally by canonical registry name, dropping (and logging)
    /// entries that are not registry regions.
    #[must_use]
    pub fn canonicalize(&self, registry: &RegionRegistry) -> Self {
        let mut canonical = Self::new();
        for (region, count) in self.iter() {
            match registry.canonical(region) {
                Some(name) => canonical.record(name, count),
                None => log::warn!("Ignoring count for unrecognized region '{region}'"),
            }
        }
        canonical
    }
}
