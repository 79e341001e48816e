#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The closed set of administrative regions a situation report can name.
//!
//! [`RegionRegistry`] answers two questions for the extraction engine:
//! "is this token a real region?" (membership, via a normalized-key lookup
//! that tolerates case and whitespace differences in prose) and "which
//! regions were never mentioned?" (completion of breakdown rows).
//!
//! The registry is immutable after construction; [`RegionRegistry::nigeria`]
//! returns a process-wide instance that can be shared freely across
//! threads.

pub mod states;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

static NIGERIA: LazyLock<RegionRegistry> =
    LazyLock::new(|| RegionRegistry::with_aliases(states::NIGERIA_STATES, states::NIGERIA_ALIASES));

/// Lowercases, trims, and collapses internal whitespace.
#[must_use]
pub fn normalize_key(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// An ordered set of canonical region names.
#[derive(Debug, Clone)]
pub struct RegionRegistry {
    names: Vec<&'static str>,
    by_key: BTreeMap<String, &'static str>,
    /// Longest key measured in words; bounds [`Self::resolve`]'s suffix scan.
    max_words: usize,
}

impl RegionRegistry {
    /// Creates a registry from canonical names, in output order.
    #[must_use]
    pub fn new(names: &[&'static str]) -> Self {
        Self::with_aliases(names, &[])
    }

    /// Creates a registry with additional alias keys. Aliases whose target
    /// is not one of `names` are ignored.
    #[must_use]
    pub fn with_aliases(names: &[&'static str], aliases: &[(&str, &'static str)]) -> Self {
        let mut by_key = BTreeMap::new();
        for &name in names {
            by_key.insert(normalize_key(name), name);
        }
        for &(alias, target) in aliases {
            if names.contains(&target) {
                by_key.insert(normalize_key(alias), target);
            }
        }

        let max_words = by_key
            .keys()
            .map(|key| key.split(' ').count())
            .max()
            .unwrap_or(0);

        Self {
            names: names.to_vec(),
            by_key,
            max_words,
        }
    }

    /// The 36 Nigerian states plus FCT.
    #[must_use]
    pub fn nigeria() -> &'static Self {
        &NIGERIA
    }

    /// Canonical names in registry order.
    #[must_use]
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Number of canonical regions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the registry has no regions.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Exact membership test on canonical spelling.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name)
    }

    /// Maps a region name with arbitrary case/spacing to its canonical
    /// spelling.
    #[must_use]
    pub fn canonical(&self, name: &str) -> Option<&'static str> {
        self.by_key.get(&normalize_key(name)).copied()
    }

    /// Like [`Self::canonical`], but when the whole text is not a region,
    /// also tries its trailing words (longest first).
    ///
    /// Text captured from layout-mangled reports often drags a preceding
    /// label along, e.g. `"Summary by state\nCross River"`.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Option<&'static str> {
        if let Some(name) = self.canonical(text) {
            return Some(name);
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let longest = self.max_words.min(words.len().saturating_sub(1));
        (1..=longest)
            .rev()
            .find_map(|n| self.canonical(&words[words.len() - n..].join(" ")))
    }

    /// Canonical regions not covered by `present`, in registry order.
    /// `present` is compared case-insensitively.
    #[must_use]
    pub fn missing<'a>(&self, present: impl IntoIterator<Item = &'a str>) -> Vec<&'static str> {
        let present: BTreeSet<String> = present.into_iter().map(normalize_key).collect();
        self.names
            .iter()
            .copied()
            .filter(|name| !present.contains(&normalize_key(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nigeria_has_37_regions() {
        let registry = RegionRegistry::nigeria();
        assert_eq!(registry.len(), 37);
        assert!(registry.contains("FCT"));
        assert!(!registry.contains("lagos"));
    }

    #[test]
    fn canonical_tolerates_case_and_spacing() {
        let registry = RegionRegistry::nigeria();
        assert_eq!(registry.canonical("  akwa   IBOM "), Some("Akwa Ibom"));
        assert_eq!(registry.canonical("LAGOS"), Some("Lagos"));
        assert_eq!(registry.canonical("Lagoss"), None);
    }

    #[test]
    fn canonical_uses_aliases() {
        let registry = RegionRegistry::nigeria();
        assert_eq!(registry.canonical("Federal Capital Territory"), Some("FCT"));
        assert_eq!(registry.canonical("Nassarawa"), Some("Nasarawa"));
    }

    #[test]
    fn resolve_strips_leading_noise() {
        let registry = RegionRegistry::nigeria();
        assert_eq!(
            registry.resolve("Summary by state\nCross River"),
            Some("Cross River")
        );
        assert_eq!(registry.resolve("In Kano"), Some("Kano"));
        assert_eq!(registry.resolve("Total"), None);
        assert_eq!(registry.resolve(""), None);
    }

    #[test]
    fn resolve_prefers_longest_suffix() {
        let registry = RegionRegistry::new(&["River", "Cross River"]);
        assert_eq!(registry.resolve("from Cross River"), Some("Cross River"));
    }

    #[test]
    fn missing_is_case_insensitive_and_ordered() {
        let registry = RegionRegistry::new(&["Abia", "Kano", "Lagos"]);
        assert_eq!(registry.missing(["lagos"]), vec!["Abia", "Kano"]);
        assert!(registry.missing(["ABIA", "kano", "Lagos"]).is_empty());
    }

    #[test]
    fn aliases_to_unknown_targets_are_ignored() {
        let registry = RegionRegistry::with_aliases(&["Kano"], &[("abuja", "FCT")]);
        assert_eq!(registry.canonical("abuja"), None);
    }
}
