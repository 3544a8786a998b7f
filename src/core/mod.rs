// Core algorithm exports
pub mod age;
pub mod filters;
pub mod matcher;
pub mod preferences;
pub mod scoring;

pub use age::{age_of, age_on, birth_date, current_age};
pub use filters::{check_eligibility, potential_matches, search_profiles};
pub use matcher::{Matcher, MatchResult, DEFAULT_TOP_LIMIT};
pub use preferences::{criteria_for, parse_age_range, parse_ethnic_preferences, parse_gender_preference};
pub use scoring::calculate_match_score;
