use serde::{Deserialize, Serialize};

use crate::models::domain::{MatchCriteria, MatchRecord, Profile, ProfileId, ScoredCandidate};

/// Profile with its derived age
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub age: Option<u32>,
}

/// Response for the profile list endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<ProfileView>,
    pub total_results: usize,
}

/// Response for the top matches endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TopMatchesResponse {
    pub primary: ProfileView,
    pub criteria: MatchCriteria,
    pub matches: Vec<ScoredCandidate>,
    pub eligible_candidates: usize,
    pub total_candidates: usize,
}

/// Response for the potential matches endpoint
#[derive(Debug, Clone, Serialize)]
pub struct PotentialMatchesResponse {
    pub primary_id: ProfileId,
    /// `None` when the primary profile accepts any gender
    pub seeking: Option<String>,
    pub matches: Vec<ProfileView>,
    pub total_results: usize,
}

/// Response for comparing one candidate against a primary profile
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResponse {
    pub primary: ProfileView,
    pub candidate: ScoredCandidate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response for the match list endpoint
#[derive(Debug, Clone, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<MatchRecord>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub snapshot_cached: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Result of a create/delete forwarded to the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
}
