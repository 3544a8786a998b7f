use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::models::Profile;
use crate::services::directory::DirectoryError;

/// Immutable list of every profile, shared by concurrent requests
pub type ProfileSnapshot = Arc<Vec<Profile>>;

const SNAPSHOT_KEY: &str = "profiles:all";

/// In-memory cache for the profile snapshot
///
/// The full profile list is fetched once and reused until the TTL expires or
/// an operator asks for a refresh. Callers get an `Arc` and never see the
/// snapshot change under them.
pub struct SnapshotCache {
    cache: moka::future::Cache<String, ProfileSnapshot>,
    ttl_secs: u64,
}

impl SnapshotCache {
    /// Create a new snapshot cache
    pub fn new(ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache, ttl_secs }
    }

    /// Return the cached snapshot, loading it with `load` on a miss
    ///
    /// Concurrent misses share a single load. A failed load is not cached.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<ProfileSnapshot, DirectoryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Profile>, DirectoryError>>,
    {
        let ttl_secs = self.ttl_secs;

        self.cache
            .try_get_with(SNAPSHOT_KEY.to_string(), async move {
                let snapshot: ProfileSnapshot = Arc::new(load().await?);
                tracing::debug!(
                    "Snapshot loaded: {} profiles, cached for {}s",
                    snapshot.len(),
                    ttl_secs
                );
                Ok::<_, DirectoryError>(snapshot)
            })
            .await
            .map_err(|shared| {
                // Still held by another waiter; fall back to the message
                Arc::try_unwrap(shared).unwrap_or_else(|e| DirectoryError::ApiError(e.to_string()))
            })
    }

    /// Drop the cached snapshot so the next request reloads it
    pub async fn invalidate(&self) {
        self.cache.invalidate(SNAPSHOT_KEY).await;
        tracing::debug!("Snapshot invalidated");
    }

    pub fn is_cached(&self) -> bool {
        self.cache.contains_key(SNAPSHOT_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn profiles(count: i64) -> Vec<Profile> {
        (1..=count)
            .map(|id| Profile {
                id,
                ..Default::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_loads_once_until_invalidated() {
        let cache = SnapshotCache::new(60);
        let counter = AtomicUsize::new(0);
        let loads = &counter;

        let load = || async move {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok::<_, DirectoryError>(profiles(3))
        };

        let first = cache.get_or_load(load).await.unwrap();
        let second = cache.get_or_load(load).await.unwrap();

        assert_eq!(first.len(), 3);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(cache.is_cached());

        cache.invalidate().await;
        assert!(!cache.is_cached());

        cache.get_or_load(load).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let cache = SnapshotCache::new(60);

        let result = cache
            .get_or_load(|| async { Err(DirectoryError::ApiError("down".to_string())) })
            .await;

        assert!(result.is_err());
        assert!(!cache.is_cached());
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_load() {
        let cache = SnapshotCache::new(60);
        let counter = AtomicUsize::new(0);
        let loads = &counter;

        let load = || async move {
            loads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok::<_, DirectoryError>(profiles(2))
        };

        let (first, second, third) = tokio::join!(
            cache.get_or_load(load),
            cache.get_or_load(load),
            cache.get_or_load(load)
        );

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first.unwrap(), &second.unwrap()));
        assert_eq!(third.unwrap().len(), 2);
    }
}
