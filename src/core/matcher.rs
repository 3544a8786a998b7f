use chrono::NaiveDate;

use crate::core::{
    age::{age_of, today},
    filters::{check_eligibility, potential_matches},
    preferences::criteria_for,
    scoring::calculate_match_score,
};
use crate::models::{MatchCriteria, Profile, ScoredCandidate, ScoringWeights};

/// Number of ranked candidates returned by default
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Result of the ranking process
#[derive(Debug)]
pub struct MatchResult {
    pub criteria: MatchCriteria,
    pub matches: Vec<ScoredCandidate>,
    pub eligible_candidates: usize,
    pub total_candidates: usize,
}

/// Candidate ranking orchestrator
///
/// # Pipeline Stages
/// 1. Parse the primary profile's answers into typed criteria
/// 2. Hard eligibility filters (gender, age, children)
/// 3. Additive scoring of the survivors
/// 4. Stable sort by score and truncation
///
/// The matcher holds no state besides its configuration; every call works on
/// the snapshot it is handed and never touches shared data.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    limit: usize,
}

impl Matcher {
    /// Create a matcher; `limit` is clamped to `1..=DEFAULT_TOP_LIMIT`
    pub fn new(weights: ScoringWeights, limit: usize) -> Self {
        let clamped = limit.clamp(1, DEFAULT_TOP_LIMIT);
        if clamped != limit {
            tracing::warn!("Top match limit {} out of range, using {}", limit, clamped);
        }

        Self {
            weights,
            limit: clamped,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_TOP_LIMIT)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rank candidates for a primary profile as of today
    pub fn top_matches(&self, primary: &Profile, candidates: &[Profile]) -> MatchResult {
        self.top_matches_on(primary, candidates, today())
    }

    /// Rank candidates for a primary profile, computing ages on `today`
    ///
    /// # Arguments
    /// * `primary` - The profile matches are sought for
    /// * `candidates` - Snapshot of all known profiles; the primary is skipped
    /// * `today` - Reference date for age computation
    ///
    /// # Returns
    /// MatchResult with at most `limit` eligible candidates, best first.
    /// Candidates with equal scores keep their snapshot order.
    pub fn top_matches_on(
        &self,
        primary: &Profile,
        candidates: &[Profile],
        today: NaiveDate,
    ) -> MatchResult {
        let criteria = criteria_for(primary);

        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .filter(|candidate| candidate.id != primary.id)
            .filter_map(|candidate| match check_eligibility(candidate, &criteria, today) {
                Ok(age) => Some(ScoredCandidate {
                    profile: candidate.clone(),
                    age: Some(age),
                    score: calculate_match_score(primary, candidate, &criteria, &self.weights),
                    eligible: true,
                    disqualification: None,
                }),
                Err(reason) => {
                    tracing::trace!("Candidate {} dropped for {}: {:?}", candidate.id, primary.id, reason);
                    None
                }
            })
            .collect();

        let eligible_candidates = scored.len();

        // sort_by is stable, so ties keep snapshot order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.limit);

        MatchResult {
            criteria,
            matches: scored,
            eligible_candidates,
            total_candidates: candidates.len(),
        }
    }

    /// Evaluate a single candidate, keeping ineligible outcomes
    pub fn evaluate(&self, primary: &Profile, candidate: &Profile) -> ScoredCandidate {
        self.evaluate_on(primary, candidate, today())
    }

    pub fn evaluate_on(
        &self,
        primary: &Profile,
        candidate: &Profile,
        today: NaiveDate,
    ) -> ScoredCandidate {
        let criteria = criteria_for(primary);

        match check_eligibility(candidate, &criteria, today) {
            Ok(age) => ScoredCandidate {
                profile: candidate.clone(),
                age: Some(age),
                score: calculate_match_score(primary, candidate, &criteria, &self.weights),
                eligible: true,
                disqualification: None,
            },
            Err(reason) => ScoredCandidate {
                profile: candidate.clone(),
                age: age_of(candidate, today),
                score: 0,
                eligible: false,
                disqualification: Some(reason),
            },
        }
    }

    /// Unscored browsing list; see [`potential_matches`]
    pub fn potential_matches<'a>(&self, primary: &Profile, candidates: &'a [Profile]) -> Vec<&'a Profile> {
        potential_matches(primary, candidates)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
