use crate::models::{MatchRecord, Profile, ProfileId};
use crate::services::repository::{MatchLedger, ProfileRepository};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the profile directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Directory returned error: {0}")]
    ApiError(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(ProfileId),

    #[error("Match not found: {0}")]
    MatchNotFound(i64),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Paths of the directory endpoints, relative to the base URL
#[derive(Debug, Clone)]
pub struct DirectoryRoutes {
    pub profile: String,
    pub profiles: String,
    pub matches: String,
    pub match_mutation: String,
}

impl Default for DirectoryRoutes {
    fn default() -> Self {
        Self {
            profile: "/api/users".to_string(),
            profiles: "/users".to_string(),
            matches: "/matches".to_string(),
            match_mutation: "/api/matches".to_string(),
        }
    }
}

/// Profile directory API client
///
/// Handles all communication with the REST API that owns the data:
/// - Fetching a single profile and the full profile list
/// - Listing, creating and deleting manual matches
pub struct DirectoryClient {
    base_url: String,
    client: Client,
    routes: DirectoryRoutes,
}

impl DirectoryClient {
    /// Create a new directory client
    pub fn new(
        base_url: String,
        timeout: Duration,
        routes: DirectoryRoutes,
    ) -> Result<Self, DirectoryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            client,
            routes,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Pull the directory's own error message out of a failed response
    async fn error_message(response: Response, context: &str) -> DirectoryError {
        let status = response.status();
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| status.to_string());
        DirectoryError::ApiError(format!("{}: {}", context, message))
    }

    /// Decode a JSON array leniently, skipping rows that fail to parse
    fn decode_rows<T>(json: Value, what: &str) -> Result<Vec<T>, DirectoryError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let rows = match json {
            Value::Array(rows) => rows,
            _ => return Err(DirectoryError::InvalidResponse(format!("Expected {} array", what))),
        };

        let total = rows.len();
        let decoded: Vec<T> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("Skipping malformed {} row: {}", what, e);
                    None
                }
            })
            .collect();

        tracing::debug!("Decoded {} of {} {} rows", decoded.len(), total, what);
        Ok(decoded)
    }
}

/// A lookup for an unknown id answers with 404, `null`, `{}` or an error object
fn is_missing_profile(json: &Value) -> bool {
    match json {
        Value::Null => true,
        Value::Object(map) => {
            map.is_empty()
                || (map.get("id").is_none() && (map.contains_key("error") || map.contains_key("message")))
        }
        _ => false,
    }
}

impl ProfileRepository for DirectoryClient {
    async fn get_profile(&self, id: ProfileId) -> Result<Profile, DirectoryError> {
        let url = self.url(&format!("{}/{}", self.routes.profile, id));

        tracing::debug!("Fetching profile {} from: {}", id, url);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::ProfileNotFound(id));
        }

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Failed to fetch profile {}: {}", id, status);
            return Err(Self::error_message(response, "Failed to fetch profile").await);
        }

        let json: Value = response.json().await?;

        if is_missing_profile(&json) {
            return Err(DirectoryError::ProfileNotFound(id));
        }

        serde_json::from_value(json)
            .map_err(|e| DirectoryError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DirectoryError> {
        let url = self.url(&self.routes.profiles);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_message(response, "Failed to list profiles").await);
        }

        let json: Value = response.json().await?;
        Self::decode_rows(json, "profile")
    }
}

impl MatchLedger for DirectoryClient {
    async fn list_matches(&self) -> Result<Vec<MatchRecord>, DirectoryError> {
        let url = self.url(&self.routes.matches);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_message(response, "Failed to list matches").await);
        }

        let json: Value = response.json().await?;
        Self::decode_rows(json, "match")
    }

    async fn create_match(&self, user_a: ProfileId, user_b: ProfileId) -> Result<(), DirectoryError> {
        let url = self.url(&self.routes.match_mutation);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "userA": user_a, "userB": user_b }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_message(response, "Failed to create match").await);
        }

        tracing::debug!("Created match: {} <-> {}", user_a, user_b);

        Ok(())
    }

    async fn delete_match(&self, match_id: i64) -> Result<(), DirectoryError> {
        let url = self.url(&format!("{}/{}", self.routes.match_mutation, match_id));

        let response = self.client.delete(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::MatchNotFound(match_id));
        }

        if !response.status().is_success() {
            return Err(Self::error_message(response, "Failed to delete match").await);
        }

        tracing::debug!("Deleted match {}", match_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_client_creation() {
        let client = DirectoryClient::new(
            "http://directory.test/".to_string(),
            Duration::from_secs(5),
            DirectoryRoutes::default(),
        )
        .unwrap();

        assert_eq!(client.base_url(), "http://directory.test/");
        assert_eq!(client.url("/users"), "http://directory.test/users");
    }

    #[test]
    fn test_missing_profile_shapes() {
        assert!(is_missing_profile(&Value::Null));
        assert!(is_missing_profile(&json!({})));
        assert!(is_missing_profile(&json!({ "error": "User not found" })));
        assert!(is_missing_profile(&json!({ "message": "No such user" })));
        assert!(!is_missing_profile(&json!({ "id": 3, "message": "hello" })));
    }
}
