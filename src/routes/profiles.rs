use actix_web::{web, HttpResponse, Responder};

use crate::core::{parse_gender_preference, search_profiles};
use crate::models::{
    ComparisonResponse, GenderPreference, PotentialMatchesResponse, ProfileId, ProfileListResponse, SearchQuery,
    TopMatchesResponse,
};
use crate::routes::{error_response, view, AppState};
use crate::services::{matchmaking, MatchError, MatchLedger, ProfileRepository};

/// Configure all profile-related routes
pub fn configure<R>(cfg: &mut web::ServiceConfig)
where
    R: ProfileRepository + MatchLedger + 'static,
{
    cfg.route("/profiles", web::get().to(list_profiles::<R>))
        .route("/profiles/{id}", web::get().to(get_profile::<R>))
        .route("/profiles/{id}/top-matches", web::get().to(top_matches::<R>))
        .route(
            "/profiles/{id}/potential-matches",
            web::get().to(potential_matches::<R>),
        )
        .route(
            "/profiles/{id}/compare/{candidate_id}",
            web::get().to(compare::<R>),
        );
}

/// List profiles from the snapshot
///
/// GET /api/v1/profiles?search={text}
///
/// `search` filters on full name or e-mail, case-insensitively.
async fn list_profiles<R>(state: web::Data<AppState<R>>, query: web::Query<SearchQuery>) -> impl Responder
where
    R: ProfileRepository + MatchLedger + 'static,
{
    let snapshot = match state.load_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(&e.into()),
    };

    let search = query.search.as_deref().unwrap_or_default();
    let profiles: Vec<_> = search_profiles(&snapshot, search)
        .into_iter()
        .cloned()
        .map(view)
        .collect();

    HttpResponse::Ok().json(ProfileListResponse {
        total_results: profiles.len(),
        profiles,
    })
}

/// Fetch a single profile
///
/// GET /api/v1/profiles/{id}
async fn get_profile<R>(state: web::Data<AppState<R>>, path: web::Path<ProfileId>) -> impl Responder
where
    R: ProfileRepository + MatchLedger + 'static,
{
    let id = path.into_inner();

    match state.repository.get_profile(id).await {
        Ok(profile) => HttpResponse::Ok().json(view(profile)),
        Err(e) => error_response(&MatchError::from(e)),
    }
}

/// Ranked top matches
///
/// GET /api/v1/profiles/{id}/top-matches
///
/// Response body:
/// ```json
/// {
///   "primary": { "id": 4, "full_name": "...", "age": 31 },
///   "criteria": { "gender": {"kind": "specific", "gender": "Female"}, "age_range": {"min_age": 25, "max_age": 30} },
///   "matches": [{ "profile": {...}, "age": 27, "score": 14, "eligible": true }],
///   "eligible_candidates": 12,
///   "total_candidates": 250
/// }
/// ```
async fn top_matches<R>(state: web::Data<AppState<R>>, path: web::Path<ProfileId>) -> impl Responder
where
    R: ProfileRepository + MatchLedger + 'static,
{
    let primary_id = path.into_inner();

    tracing::info!("Finding top matches for profile: {}", primary_id);

    let snapshot = match state.load_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(&e.into()),
    };

    match matchmaking::find_top_matches(
        state.repository.as_ref(),
        &state.matcher,
        &snapshot,
        primary_id,
    )
    .await
    {
        Ok((primary, result)) => HttpResponse::Ok().json(TopMatchesResponse {
            primary: view(primary),
            criteria: result.criteria,
            matches: result.matches,
            eligible_candidates: result.eligible_candidates,
            total_candidates: result.total_candidates,
        }),
        Err(e) => {
            tracing::info!("Top matches for {} failed: {}", primary_id, e);
            error_response(&e)
        }
    }
}

/// Unscored list of profiles of the sought gender
///
/// GET /api/v1/profiles/{id}/potential-matches
async fn potential_matches<R>(state: web::Data<AppState<R>>, path: web::Path<ProfileId>) -> impl Responder
where
    R: ProfileRepository + MatchLedger + 'static,
{
    let primary_id = path.into_inner();

    let snapshot = match state.load_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(&e.into()),
    };

    match matchmaking::find_potential_matches(
        state.repository.as_ref(),
        &state.matcher,
        &snapshot,
        primary_id,
    )
    .await
    {
        Ok((primary, matches)) => {
            let matches: Vec<_> = matches.into_iter().cloned().map(view).collect();
            let seeking = match parse_gender_preference(primary.partner_gender.as_deref()) {
                GenderPreference::Specific(gender) => Some(gender),
                GenderPreference::NoRestriction => None,
            };

            HttpResponse::Ok().json(PotentialMatchesResponse {
                primary_id,
                seeking,
                total_results: matches.len(),
                matches,
            })
        }
        Err(e) => error_response(&e),
    }
}

/// Evaluate one candidate against a primary profile
///
/// GET /api/v1/profiles/{id}/compare/{candidate_id}
///
/// Unlike the ranking, ineligible candidates are returned with the filter
/// they failed.
async fn compare<R>(
    state: web::Data<AppState<R>>,
    path: web::Path<(ProfileId, ProfileId)>,
) -> impl Responder
where
    R: ProfileRepository + MatchLedger + 'static,
{
    let (primary_id, candidate_id) = path.into_inner();

    match matchmaking::compare_candidate(
        state.repository.as_ref(),
        &state.matcher,
        primary_id,
        candidate_id,
    )
    .await
    {
        Ok((primary, candidate)) => {
            let reason = candidate
                .disqualification
                .map(|d| d.describe().to_string());

            HttpResponse::Ok().json(ComparisonResponse {
                primary: view(primary),
                candidate,
                reason,
            })
        }
        Err(e) => error_response(&e),
    }
}
