use chrono::NaiveDate;

use crate::core::age::age_of;
use crate::core::preferences::parse_gender_preference;
use crate::models::{Disqualification, MatchCriteria, Profile};

/// Apply the hard eligibility filters to a candidate
///
/// Filters run in a fixed order (gender, age, children) and the first one
/// that fails is reported. On success the candidate's age is returned.
#[inline]
pub fn check_eligibility(
    candidate: &Profile,
    criteria: &MatchCriteria,
    today: NaiveDate,
) -> Result<u32, Disqualification> {
    if !criteria.gender.accepts(candidate.gender()) {
        return Err(Disqualification::GenderMismatch);
    }

    // Unknown age never counts as inside the range
    let age = age_of(candidate, today).ok_or(Disqualification::UnknownAge)?;
    if !criteria.age_range.contains(age) {
        return Err(Disqualification::AgeOutOfRange);
    }

    if candidate.has_children_under_18() && criteria.refuses_children {
        return Err(Disqualification::ChildrenNotAccepted);
    }

    Ok(age)
}

/// Coarse prefilter used to populate the candidate browsing list
///
/// Keeps every other profile whose gender is the one the primary profile is
/// seeking, or every other profile when it accepts any gender. No age,
/// city, ethnicity or children logic, no scoring and no truncation.
pub fn potential_matches<'a>(primary: &Profile, candidates: &'a [Profile]) -> Vec<&'a Profile> {
    let preference = parse_gender_preference(primary.partner_gender.as_deref());

    candidates
        .iter()
        .filter(|candidate| candidate.id != primary.id)
        .filter(|candidate| preference.accepts(candidate.gender()))
        .collect()
}

/// Case-insensitive search over full name and e-mail
///
/// A blank query keeps every profile.
pub fn search_profiles<'a>(profiles: &'a [Profile], query: &str) -> Vec<&'a Profile> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return profiles.iter().collect();
    }

    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    };

    profiles
        .iter()
        .filter(|profile| contains(&profile.full_name) || contains(&profile.email))
        .collect()
}
