//! Match Desk - candidate scoring and ranking for the matchmaking admin console
//!
//! This library provides the ranking engine behind the console's "Top Match"
//! and "Potential Matches" views, plus the HTTP layer that feeds it profiles
//! from the external directory API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{age_on, Matcher, MatchResult};
pub use models::{MatchCriteria, Profile, ProfileId, ScoredCandidate, ScoringWeights};
pub use services::{DirectoryClient, InMemoryDirectory, MatchError, ProfileRepository, SnapshotCache};
