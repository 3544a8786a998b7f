// Model exports
pub mod domain;
pub mod flexible;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeRange, Disqualification, EthnicPreferences, GenderPreference, MatchCriteria, MatchRecord,
    Profile, ProfileId, ScoredCandidate, ScoringWeights,
};
pub use requests::{CreateMatchRequest, SearchQuery};
pub use responses::{
    ComparisonResponse, ErrorResponse, HealthResponse, MatchListResponse, MutationResponse,
    PotentialMatchesResponse, ProfileListResponse, ProfileView, TopMatchesResponse,
};
