// Route exports
pub mod matches;
pub mod profiles;

use actix_web::{web, HttpResponse};

use crate::core::current_age;
use crate::models::{ErrorResponse, Profile, ProfileView};
use crate::services::{DirectoryError, MatchError, MatchLedger, ProfileRepository};

pub use matches::AppState;

pub fn configure_routes<R>(cfg: &mut web::ServiceConfig)
where
    R: ProfileRepository + MatchLedger + 'static,
{
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure::<R>)
            .configure(profiles::configure::<R>),
    );
}

/// Attach the derived age for display
pub(crate) fn view(profile: Profile) -> ProfileView {
    let age = current_age(&profile);
    ProfileView { profile, age }
}

/// Translate a failed request into its JSON error body
pub(crate) fn error_response(err: &MatchError) -> HttpResponse {
    match err {
        MatchError::NotFound(_) | MatchError::Directory(DirectoryError::MatchNotFound(_)) => {
            HttpResponse::NotFound().json(ErrorResponse {
                error: "Not found".to_string(),
                message: err.to_string(),
                status_code: 404,
            })
        }
        MatchError::SelfPairing(_) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid pairing".to_string(),
            message: err.to_string(),
            status_code: 400,
        }),
        MatchError::Directory(e) => {
            tracing::error!("Directory request failed: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Directory unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}
