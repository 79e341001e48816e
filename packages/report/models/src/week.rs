//! Epidemiological reporting weeks.
//!
//! Situation reports cover either a single epi week (`"11"`), a multi-week
//! range (`"13-16"`), or a week that could not be determined at all. The
//! textual form is what ends up in the output file, so [`Week`] serializes
//! through its [`Display`](std::fmt::Display) implementation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Literal used for a week that could not be resolved.
pub const UNKNOWN_WEEK: &str = "Unknown";

/// A reporting week or week range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Week {
    /// A single epi week number.
    Single(u32),
    /// An inclusive range of epi weeks, as written in the report.
    Range {
        /// First week of the range.
        start: u32,
        /// Last week of the range.
        end: u32,
    },
    /// No week could be determined.
    Unknown,
}

impl Week {
    /// Whether this week is still unresolved.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns `self` unless it is [`Week::Unknown`], in which case the
    /// result of `fallback` is used.
    #[must_use]
    pub fn or_else(self, fallback: impl FnOnce() -> Self) -> Self {
        if self.is_unknown() { fallback() } else { self }
    }

    /// Known weeks sort numerically by their first then last week; unknown
    /// weeks sort after everything else.
    const fn sort_key(self) -> (u8, u32, u32) {
        match self {
            Self::Single(week) => (0, week, week),
            Self::Range { start, end } => (0, start, end),
            Self::Unknown => (1, 0, 0),
        }
    }
}

impl PartialOrd for Week {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Week {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(week) => write!(f, "{week}"),
            Self::Range { start, end } => write!(f, "{start}-{end}"),
            Self::Unknown => f.write_str(UNKNOWN_WEEK),
        }
    }
}

/// Error returned when a string is not a week token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidWeekError {
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for InvalidWeekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid week '{}': expected a number, a range like 13-16, or {UNKNOWN_WEEK}",
            self.value
        )
    }
}

impl std::error::Error for InvalidWeekError {}

impl FromStr for Week {
    type Err = InvalidWeekError;

    /// Parses `"11"`, `"13-16"`, `"13 - 16"` or `"Unknown"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || InvalidWeekError {
            value: s.to_owned(),
        };

        if trimmed.eq_ignore_ascii_case(UNKNOWN_WEEK) {
            return Ok(Self::Unknown);
        }

        if let Some((start, end)) = trimmed.split_once('-') {
            let start = start.trim().parse().map_err(|_| invalid())?;
            let end = end.trim().parse().map_err(|_| invalid())?;
            return Ok(Self::Range { start, end });
        }

        trimmed.parse().map(Self::Single).map_err(|_| invalid())
    }
}

impl Serialize for Week {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Week {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_week() {
        assert_eq!("11".parse::<Week>().unwrap(), Week::Single(11));
    }

    #[test]
    fn parses_range_with_loose_spacing() {
        assert_eq!(
            "13 - 16".parse::<Week>().unwrap(),
            Week::Range { start: 13, end: 16 }
        );
        assert_eq!(Week::Range { start: 13, end: 16 }.to_string(), "13-16");
    }

    #[test]
    fn parses_unknown_case_insensitively() {
        assert_eq!("unknown".parse::<Week>().unwrap(), Week::Unknown);
        assert_eq!(Week::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn rejects_garbage() {
        assert!("week eleven".parse::<Week>().is_err());
        assert!("3-".parse::<Week>().is_err());
    }

    #[test]
    fn orders_numerically_with_unknown_last() {
        let mut weeks = vec![
            Week::Unknown,
            Week::Single(10),
            Week::Range { start: 2, end: 4 },
            Week::Single(2),
        ];
        weeks.sort();
        assert_eq!(
            weeks,
            vec![
                Week::Single(2),
                Week::Range { start: 2, end: 4 },
                Week::Single(10),
                Week::Unknown,
            ]
        );
    }

    #[test]
    fn or_else_only_replaces_unknown() {
        assert_eq!(Week::Unknown.or_else(|| Week::Single(5)), Week::Single(5));
        assert_eq!(Week::Single(3).or_else(|| Week::Single(5)), Week::Single(3));
    }
}
