use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{flexible, ProfileId};

/// Request to pair two profiles manually
///
/// The console posts the ids straight from text inputs, so both numbers and
/// numeric strings are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_distinct_profiles"))]
pub struct CreateMatchRequest {
    #[validate(range(min = 1))]
    #[serde(rename = "userA", alias = "user_a", deserialize_with = "flexible::id")]
    pub user_a: ProfileId,
    #[validate(range(min = 1))]
    #[serde(rename = "userB", alias = "user_b", deserialize_with = "flexible::id")]
    pub user_b: ProfileId,
}

fn validate_distinct_profiles(req: &CreateMatchRequest) -> Result<(), ValidationError> {
    if req.user_a == req.user_b {
        let mut err = ValidationError::new("self_match");
        err.message = Some("Cannot match a user to themselves".into());
        return Err(err);
    }
    Ok(())
}

/// Query string for the profile list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Option<String>,
}
