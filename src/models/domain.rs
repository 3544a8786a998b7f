use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::flexible;

/// Directory identifier of a registered person
pub type ProfileId = i64;

/// Registered profile as served by the directory
///
/// Only the fields the matching engine and the operator views need are
/// modelled; anything else in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(deserialize_with = "flexible::id")]
    pub id: ProfileId,
    #[serde(default, deserialize_with = "flexible::text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "flexible::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "flexible::text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "flexible::text")]
    pub partner_gender: Option<String>,
    #[serde(default, deserialize_with = "flexible::text")]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "flexible::integer_like", skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i64>,
    #[serde(default, deserialize_with = "flexible::integer_like", skip_serializing_if = "Option::is_none")]
    pub birth_month: Option<i64>,
    #[serde(default, deserialize_with = "flexible::integer_like", skip_serializing_if = "Option::is_none")]
    pub birth_day: Option<i64>,
    #[serde(default, deserialize_with = "flexible::text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "flexible::text")]
    pub ethnicity: Option<String>,
    #[serde(default, deserialize_with = "flexible::text", skip_serializing_if = "Option::is_none")]
    pub ethnic_group: Option<String>,
    #[serde(default, deserialize_with = "flexible::text")]
    pub ethnic_preferences: Option<String>,
    #[serde(default, deserialize_with = "flexible::text")]
    pub age_ranges: Option<String>,
    #[serde(default, deserialize_with = "flexible::text")]
    pub education_level: Option<String>,
    #[serde(default, deserialize_with = "flexible::boolean_like")]
    pub accept_partner_with_children: Option<bool>,
    #[serde(default, deserialize_with = "flexible::boolean_like")]
    pub children_under_18: Option<bool>,
    /// Carried for display only; no coordinates exist to evaluate it against
    #[serde(default, deserialize_with = "flexible::number_like")]
    pub willing_distance: Option<f64>,
}

impl Profile {
    /// Name to show operators, falling back to the id
    pub fn display_name(&self) -> String {
        match non_blank(&self.full_name) {
            Some(name) => name.to_string(),
            None => format!("User {}", self.id),
        }
    }

    /// Own ethnic group; older rows store it as `ethnic_group`
    pub fn ethnicity(&self) -> Option<&str> {
        non_blank(&self.ethnicity).or_else(|| non_blank(&self.ethnic_group))
    }

    pub fn city(&self) -> Option<&str> {
        non_blank(&self.city)
    }

    pub fn education_level(&self) -> Option<&str> {
        non_blank(&self.education_level)
    }

    pub fn gender(&self) -> Option<&str> {
        non_blank(&self.gender)
    }

    /// Helper to get children_under_18 as a bool, defaulting to false
    pub fn has_children_under_18(&self) -> bool {
        self.children_under_18.unwrap_or(false)
    }

    /// True only when the profile explicitly refuses partners with children
    pub fn refuses_partner_with_children(&self) -> bool {
        self.accept_partner_with_children == Some(false)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Which genders a profile is seeking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "gender", rename_all = "snake_case")]
pub enum GenderPreference {
    /// Any gender is acceptable
    NoRestriction,
    /// Candidates must report exactly this gender
    Specific(String),
}

impl GenderPreference {
    pub fn accepts(&self, gender: Option<&str>) -> bool {
        match self {
            GenderPreference::NoRestriction => true,
            GenderPreference::Specific(wanted) => gender == Some(wanted.as_str()),
        }
    }
}

/// Inclusive accepted age interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeRange {
    pub min_age: u32,
    pub max_age: u32,
}

impl AgeRange {
    pub const DEFAULT_MIN: u32 = 18;
    pub const DEFAULT_MAX: u32 = 99;

    pub fn contains(&self, age: u32) -> bool {
        age >= self.min_age && age <= self.max_age
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            min_age: Self::DEFAULT_MIN,
            max_age: Self::DEFAULT_MAX,
        }
    }
}

/// Ethnicities a profile prefers in a partner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum EthnicPreferences {
    /// The profile stated it has no preference; the bonus check is skipped
    NoPreference,
    /// Lower-cased, trimmed preference items
    Listed(BTreeSet<String>),
}

impl EthnicPreferences {
    pub fn includes(&self, ethnicity: Option<&str>) -> bool {
        match (self, ethnicity) {
            (EthnicPreferences::Listed(values), Some(ethnicity)) => {
                values.contains(&ethnicity.trim().to_lowercase())
            }
            _ => false,
        }
    }
}

impl Default for EthnicPreferences {
    fn default() -> Self {
        EthnicPreferences::Listed(BTreeSet::new())
    }
}

/// Typed matching criteria derived from a primary profile's free-form answers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCriteria {
    pub gender: GenderPreference,
    pub age_range: AgeRange,
    pub ethnic_preferences: EthnicPreferences,
    pub refuses_children: bool,
}

/// Hard filter a candidate failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disqualification {
    GenderMismatch,
    UnknownAge,
    AgeOutOfRange,
    ChildrenNotAccepted,
}

impl Disqualification {
    pub fn describe(&self) -> &'static str {
        match self {
            Disqualification::GenderMismatch => "candidate gender is not the one sought",
            Disqualification::UnknownAge => "candidate birth date is missing or invalid",
            Disqualification::AgeOutOfRange => "candidate age is outside the accepted range",
            Disqualification::ChildrenNotAccepted => "candidate has children under 18",
        }
    }
}

/// Outcome of evaluating one candidate against a primary profile
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub profile: Profile,
    pub age: Option<u32>,
    pub score: u32,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disqualification: Option<Disqualification>,
}

/// Manually created pairing kept by the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(deserialize_with = "flexible::id")]
    pub id: i64,
    #[serde(deserialize_with = "flexible::id")]
    pub user_a_id: ProfileId,
    #[serde(default, deserialize_with = "flexible::text")]
    pub user_a_name: Option<String>,
    #[serde(deserialize_with = "flexible::id")]
    pub user_b_id: ProfileId,
    #[serde(default, deserialize_with = "flexible::text")]
    pub user_b_name: Option<String>,
    #[serde(default, deserialize_with = "flexible::text")]
    pub matched_on: Option<String>,
}

/// Points awarded per satisfied scoring criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub gender: u32,
    pub city: u32,
    pub ethnicity: u32,
    pub education: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            gender: 5,
            city: 3,
            ethnicity: 4,
            education: 2,
        }
    }
}
