//! Conversion of free-form questionnaire answers into typed criteria.
//!
//! Everything the registration form stores as plain text is parsed here, so
//! the filters and the scorer only ever see [`MatchCriteria`]. Malformed
//! answers degrade to the documented defaults instead of failing.

use std::collections::BTreeSet;

use crate::models::{AgeRange, EthnicPreferences, GenderPreference, MatchCriteria, Profile};

/// Spellings of "any gender" found in directory rows
const NO_GENDER_RESTRICTION: &[&str] = &["any", "both"];

/// Spellings of "no ethnic preference" found in directory rows
const NO_ETHNIC_PREFERENCE: &[&str] = &["any", "all", "none", "no preference", "open to all"];

/// Parse the sought partner gender
///
/// Absent or blank values, `Any` and `Both` all mean no restriction.
pub fn parse_gender_preference(raw: Option<&str>) -> GenderPreference {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => GenderPreference::NoRestriction,
        Some(value) if is_one_of(value, NO_GENDER_RESTRICTION) => GenderPreference::NoRestriction,
        Some(value) => GenderPreference::Specific(value.to_string()),
    }
}

/// Parse an age preference such as `"25-30"` or `"20-25, 26-30"`
///
/// Every digit run in the string is collected and the envelope
/// `[smallest, largest]` is returned, so multiple sub-ranges widen into one
/// interval. Strings without digits give the default 18..=99.
pub fn parse_age_range(raw: Option<&str>) -> AgeRange {
    let numbers: Vec<u32> = raw
        .unwrap_or_default()
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<u32>().unwrap_or(u32::MAX))
        .collect();

    match (numbers.iter().min(), numbers.iter().max()) {
        (Some(&min_age), Some(&max_age)) => AgeRange { min_age, max_age },
        _ => AgeRange::default(),
    }
}

/// Parse a comma separated list of preferred ethnicities
pub fn parse_ethnic_preferences(raw: Option<&str>) -> EthnicPreferences {
    let raw = raw.map(str::trim).unwrap_or_default();
    if is_one_of(raw, NO_ETHNIC_PREFERENCE) {
        return EthnicPreferences::NoPreference;
    }

    let values: BTreeSet<String> = raw
        .split([',', ';', '/'])
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect();

    EthnicPreferences::Listed(values)
}

/// Build the typed criteria of a primary profile
pub fn criteria_for(primary: &Profile) -> MatchCriteria {
    MatchCriteria {
        gender: parse_gender_preference(primary.partner_gender.as_deref()),
        age_range: parse_age_range(primary.age_ranges.as_deref()),
        ethnic_preferences: parse_ethnic_preferences(primary.ethnic_preferences.as_deref()),
        refuses_children: primary.refuses_partner_with_children(),
    }
}

fn is_one_of(value: &str, spellings: &[&str]) -> bool {
    spellings.iter().any(|s| value.eq_ignore_ascii_case(s))
}
