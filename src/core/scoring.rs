use crate::models::{MatchCriteria, Profile, ScoringWeights};

/// Calculate the additive affinity score of an eligible candidate
///
/// Scoring table (default points):
/// ```text
/// gender requirement satisfied   +5   always, the gender filter already passed
/// same city                      +3   exact, case-sensitive
/// ethnicity in preferences       +4   skipped under "no preference"
/// same education level           +2   exact
/// ```
/// Distance is never scored: profiles carry no coordinates.
pub fn calculate_match_score(
    primary: &Profile,
    candidate: &Profile,
    criteria: &MatchCriteria,
    weights: &ScoringWeights,
) -> u32 {
    let mut score = weights.gender;

    if same_value(primary.city(), candidate.city()) {
        score = score.saturating_add(weights.city);
    }

    if criteria.ethnic_preferences.includes(candidate.ethnicity()) {
        score = score.saturating_add(weights.ethnicity);
    }

    if same_value(primary.education_level(), candidate.education_level()) {
        score = score.saturating_add(weights.education);
    }

    score
}

/// Both sides present and byte-for-byte equal
#[inline]
fn same_value(a: Option<&str>, b: Option<&str>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}
