use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Matcher;
use crate::models::{CreateMatchRequest, ErrorResponse, HealthResponse, MatchListResponse, MutationResponse};
use crate::routes::error_response;
use crate::services::{
    matchmaking, DirectoryError, MatchError, MatchLedger, ProfileRepository, ProfileSnapshot,
    SnapshotCache,
};

/// Application state shared across all handlers
pub struct AppState<R> {
    pub repository: Arc<R>,
    pub snapshot: Arc<SnapshotCache>,
    pub matcher: Matcher,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            snapshot: Arc::clone(&self.snapshot),
            matcher: self.matcher.clone(),
        }
    }
}

impl<R: ProfileRepository> AppState<R> {
    pub fn new(repository: Arc<R>, snapshot: Arc<SnapshotCache>, matcher: Matcher) -> Self {
        Self {
            repository,
            snapshot,
            matcher,
        }
    }

    /// Current profile snapshot, fetched from the directory on a cache miss
    pub async fn load_snapshot(&self) -> Result<ProfileSnapshot, DirectoryError> {
        self.snapshot
            .get_or_load(|| self.repository.list_profiles())
            .await
    }
}

/// Configure health, match ledger and snapshot routes
pub fn configure<R>(cfg: &mut web::ServiceConfig)
where
    R: ProfileRepository + MatchLedger + 'static,
{
    cfg.route("/health", web::get().to(health_check::<R>))
        .route("/matches", web::get().to(list_matches::<R>))
        .route("/matches", web::post().to(create_match::<R>))
        .route("/matches/{id}", web::delete().to(delete_match::<R>))
        .route("/snapshot/refresh", web::post().to(refresh_snapshot::<R>));
}

/// Health check endpoint
async fn health_check<R>(state: web::Data<AppState<R>>) -> impl Responder
where
    R: ProfileRepository + MatchLedger + 'static,
{
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        snapshot_cached: state.snapshot.is_cached(),
        timestamp: chrono::Utc::now(),
    })
}

/// List manual matches
///
/// GET /api/v1/matches
async fn list_matches<R>(state: web::Data<AppState<R>>) -> impl Responder
where
    R: ProfileRepository + MatchLedger + 'static,
{
    match state.repository.list_matches().await {
        Ok(matches) => HttpResponse::Ok().json(MatchListResponse {
            total_results: matches.len(),
            matches,
        }),
        Err(e) => error_response(&MatchError::from(e)),
    }
}

/// Create a manual match
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "userA": 12,
///   "userB": "31"
/// }
/// ```
async fn create_match<R>(
    state: web::Data<AppState<R>>,
    req: web::Json<CreateMatchRequest>,
) -> impl Responder
where
    R: ProfileRepository + MatchLedger + 'static,
{
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match matchmaking::create_manual_match(state.repository.as_ref(), req.user_a, req.user_b).await {
        Ok((profile_a, profile_b)) => HttpResponse::Created().json(MutationResponse {
            success: true,
            message: format!(
                "Match created successfully between {} and {}",
                profile_a.display_name(),
                profile_b.display_name()
            ),
        }),
        Err(e) => error_response(&e),
    }
}

/// Delete a manual match
///
/// DELETE /api/v1/matches/{id}
async fn delete_match<R>(state: web::Data<AppState<R>>, path: web::Path<i64>) -> impl Responder
where
    R: ProfileRepository + MatchLedger + 'static,
{
    let match_id = path.into_inner();

    match state.repository.delete_match(match_id).await {
        Ok(()) => {
            tracing::info!("Match {} deleted", match_id);
            HttpResponse::Ok().json(MutationResponse {
                success: true,
                message: format!("Match ID {} was successfully deleted.", match_id),
            })
        }
        Err(e) => error_response(&MatchError::from(e)),
    }
}

/// Drop the cached profile snapshot
///
/// POST /api/v1/snapshot/refresh
async fn refresh_snapshot<R>(state: web::Data<AppState<R>>) -> impl Responder
where
    R: ProfileRepository + MatchLedger + 'static,
{
    state.snapshot.invalidate().await;

    HttpResponse::Ok().json(MutationResponse {
        success: true,
        message: "Profile snapshot will be reloaded on the next request".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            snapshot_cached: false,
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
