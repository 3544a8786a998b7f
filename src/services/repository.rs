use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use crate::models::{MatchRecord, Profile, ProfileId};
use crate::services::directory::DirectoryError;

/// Source of profiles
///
/// `get_profile` resolves one primary profile; `list_profiles` feeds the
/// snapshot that the matcher later ranks synchronously.
pub trait ProfileRepository: Send + Sync {
    fn get_profile(
        &self,
        id: ProfileId,
    ) -> impl Future<Output = Result<Profile, DirectoryError>> + Send;

    fn list_profiles(&self) -> impl Future<Output = Result<Vec<Profile>, DirectoryError>> + Send;
}

/// Store of manual pairings
pub trait MatchLedger: Send + Sync {
    fn list_matches(&self) -> impl Future<Output = Result<Vec<MatchRecord>, DirectoryError>> + Send;

    fn create_match(
        &self,
        user_a: ProfileId,
        user_b: ProfileId,
    ) -> impl Future<Output = Result<(), DirectoryError>> + Send;

    fn delete_match(&self, match_id: i64) -> impl Future<Output = Result<(), DirectoryError>> + Send;
}

/// Directory held entirely in memory
///
/// Backs tests and benchmarks; profiles are fixed at construction while
/// match records can be added and removed.
pub struct InMemoryDirectory {
    profiles: Vec<Profile>,
    matches: RwLock<Vec<MatchRecord>>,
    next_match_id: AtomicI64,
}

impl InMemoryDirectory {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self {
            profiles,
            matches: RwLock::new(Vec::new()),
            next_match_id: AtomicI64::new(1),
        }
    }

    fn find(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }
}

impl ProfileRepository for InMemoryDirectory {
    async fn get_profile(&self, id: ProfileId) -> Result<Profile, DirectoryError> {
        self.find(id).cloned().ok_or(DirectoryError::ProfileNotFound(id))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DirectoryError> {
        Ok(self.profiles.clone())
    }
}

impl MatchLedger for InMemoryDirectory {
    async fn list_matches(&self) -> Result<Vec<MatchRecord>, DirectoryError> {
        Ok(self.matches.read().await.clone())
    }

    async fn create_match(&self, user_a: ProfileId, user_b: ProfileId) -> Result<(), DirectoryError> {
        let name = |id| self.find(id).map(Profile::display_name);
        let record = MatchRecord {
            id: self.next_match_id.fetch_add(1, Ordering::Relaxed),
            user_a_id: user_a,
            user_a_name: name(user_a),
            user_b_id: user_b,
            user_b_name: name(user_b),
            matched_on: Some(chrono::Utc::now().to_rfc3339()),
        };

        self.matches.write().await.push(record);
        Ok(())
    }

    async fn delete_match(&self, match_id: i64) -> Result<(), DirectoryError> {
        let mut matches = self.matches.write().await;
        let before = matches.len();
        matches.retain(|m| m.id != match_id);

        if matches.len() == before {
            return Err(DirectoryError::MatchNotFound(match_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: i64) -> Profile {
        Profile {
            id,
            full_name: Some(format!("Person {}", id)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_profile() {
        let directory = InMemoryDirectory::new(vec![profile(1), profile(2)]);

        assert_eq!(directory.get_profile(2).await.unwrap().id, 2);
        assert!(matches!(
            directory.get_profile(9).await,
            Err(DirectoryError::ProfileNotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_match_ledger_roundtrip() {
        let directory = InMemoryDirectory::new(vec![profile(1), profile(2)]);

        directory.create_match(1, 2).await.unwrap();
        let matches = directory.list_matches().await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].user_b_name.as_deref(), Some("Person 2"));

        directory.delete_match(matches[0].id).await.unwrap();
        assert!(directory.list_matches().await.unwrap().is_empty());
        assert!(matches!(
            directory.delete_match(matches[0].id).await,
            Err(DirectoryError::MatchNotFound(_))
        ));
    }
}
