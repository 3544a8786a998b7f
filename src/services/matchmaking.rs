//! Request-level operations: resolve the primary profile, then hand the
//! snapshot to the synchronous matcher.

use thiserror::Error;

use crate::core::{MatchResult, Matcher};
use crate::models::{Profile, ProfileId, ScoredCandidate};
use crate::services::directory::DirectoryError;
use crate::services::repository::{MatchLedger, ProfileRepository};

/// Errors that abort a single matching request
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Profile {0} not found")]
    NotFound(ProfileId),

    #[error("Profile {0} cannot be paired with itself")]
    SelfPairing(ProfileId),

    #[error("Directory error: {0}")]
    Directory(DirectoryError),
}

impl From<DirectoryError> for MatchError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::ProfileNotFound(id) => MatchError::NotFound(id),
            other => MatchError::Directory(other),
        }
    }
}

/// Rank the snapshot for one primary profile
///
/// Nothing is scored unless the primary id resolves.
pub async fn find_top_matches<R: ProfileRepository>(
    repository: &R,
    matcher: &Matcher,
    snapshot: &[Profile],
    primary_id: ProfileId,
) -> Result<(Profile, MatchResult), MatchError> {
    let primary = repository.get_profile(primary_id).await?;
    let result = matcher.top_matches(&primary, snapshot);

    tracing::info!(
        "Ranked {} of {} eligible candidates for profile {} (snapshot: {})",
        result.matches.len(),
        result.eligible_candidates,
        primary_id,
        result.total_candidates
    );

    Ok((primary, result))
}

/// Unscored browsing list for one primary profile
pub async fn find_potential_matches<'a, R: ProfileRepository>(
    repository: &R,
    matcher: &Matcher,
    snapshot: &'a [Profile],
    primary_id: ProfileId,
) -> Result<(Profile, Vec<&'a Profile>), MatchError> {
    let primary = repository.get_profile(primary_id).await?;
    let matches = matcher.potential_matches(&primary, snapshot);

    tracing::debug!("{} potential matches for profile {}", matches.len(), primary_id);

    Ok((primary, matches))
}

/// Evaluate one candidate against a primary profile, eligible or not
pub async fn compare_candidate<R: ProfileRepository>(
    repository: &R,
    matcher: &Matcher,
    primary_id: ProfileId,
    candidate_id: ProfileId,
) -> Result<(Profile, ScoredCandidate), MatchError> {
    if primary_id == candidate_id {
        return Err(MatchError::SelfPairing(primary_id));
    }

    let primary = repository.get_profile(primary_id).await?;
    let candidate = repository.get_profile(candidate_id).await?;

    let outcome = matcher.evaluate(&primary, &candidate);

    Ok((primary, outcome))
}

/// Record a manual pairing once both profiles are confirmed to exist
pub async fn create_manual_match<R>(
    repository: &R,
    user_a: ProfileId,
    user_b: ProfileId,
) -> Result<(Profile, Profile), MatchError>
where
    R: ProfileRepository + MatchLedger,
{
    if user_a == user_b {
        return Err(MatchError::SelfPairing(user_a));
    }

    let profile_a = repository.get_profile(user_a).await?;
    let profile_b = repository.get_profile(user_b).await?;

    repository.create_match(user_a, user_b).await?;

    tracing::info!(
        "Manual match created between {} ({}) and {} ({})",
        profile_a.display_name(),
        user_a,
        profile_b.display_name(),
        user_b
    );

    Ok((profile_a, profile_b))
}
