//! Nigerian state names.
//!
//! The 36 states plus the Federal Capital Territory, in alphabetical order
//! with FCT last, matching the order used by NCDC situation reports.

/// Canonical names of the 36 states + FCT.
pub const NIGERIA_STATES: &[&str] = &[
    "Abia",
    "Adamawa",
    "Akwa Ibom",
    "Anambra",
    "Bauchi",
    "Bayelsa",
    "Benue",
    "Borno",
    "Cross River",
    "Delta",
    "Ebonyi",
    "Edo",
    "Ekiti",
    "Enugu",
    "Gombe",
    "Imo",
    "Jigawa",
    "Kaduna",
    "Kano",
    "Katsina",
    "Kebbi",
    "Kogi",
    "Kwara",
    "Lagos",
    "Nasarawa",
    "Niger",
    "Ogun",
    "Ondo",
    "Osun",
    "Oyo",
    "Plateau",
    "Rivers",
    "Sokoto",
    "Taraba",
    "Yobe",
    "Zamfara",
    "FCT",
];

/// Alternate spellings seen in reports, keyed by normalized form.
///
/// These are exact lookups, not similarity matches.
pub const NIGERIA_ALIASES: &[(&str, &str)] = &[
    ("federal capital territory", "FCT"),
    ("fct abuja", "FCT"),
    ("nassarawa", "Nasarawa"),
    ("akwa-ibom", "Akwa Ibom"),
    ("cross-river", "Cross River"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_count() {
        assert_eq!(NIGERIA_STATES.len(), 37);
    }

    #[test]
    fn aliases_point_at_real_states() {
        for (alias, target) in NIGERIA_ALIASES {
            assert!(
                NIGERIA_STATES.contains(target),
                "alias {alias} points at unknown state {target}"
            );
        }
    }
}
