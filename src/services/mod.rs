// Service exports
pub mod cache;
pub mod directory;
pub mod matchmaking;
pub mod repository;

pub use cache::{ProfileSnapshot, SnapshotCache};
pub use directory::{DirectoryClient, DirectoryError, DirectoryRoutes};
pub use matchmaking::MatchError;
pub use repository::{InMemoryDirectory, MatchLedger, ProfileRepository};
