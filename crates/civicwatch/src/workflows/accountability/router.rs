use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{CorruptionCase, LeaderRegistration, LeaderSlug, PolicyAction};
use super::evaluation::{answer_set_from_submission, SubmittedAnswer};
use super::repository::{LeaderRepository, RepositoryError};
use super::service::{AccountabilityServiceError, LeaderAccountabilityService, ProfileUpdate};

/// Router builder exposing HTTP endpoints for leader registration,
/// accountability views, and submissions.
pub fn leader_router<R>(service: Arc<LeaderAccountabilityService<R>>) -> Router
where
    R: LeaderRepository + 'static,
{
    Router::new()
        .route("/api/v1/leaders", post(register_handler::<R>))
        .route("/api/v1/leaders/:slug", get(view_handler::<R>))
        .route("/api/v1/leaders/:slug/profile", post(profile_handler::<R>))
        .route(
            "/api/v1/leaders/:slug/evaluations",
            post(evaluation_handler::<R>),
        )
        .route("/api/v1/leaders/:slug/cases", post(case_handler::<R>))
        .route("/api/v1/leaders/:slug/policies", post(policy_handler::<R>))
        .with_state(service)
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<LeaderAccountabilityService<R>>>,
    axum::Json(registration): axum::Json<LeaderRegistration>,
) -> Response
where
    R: LeaderRepository + 'static,
{
    match service.register(registration) {
        Ok(record) => {
            (StatusCode::CREATED, axum::Json(record.accountability_view())).into_response()
        }
        Err(AccountabilityServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({ "error": "leader already registered" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn view_handler<R>(
    State(service): State<Arc<LeaderAccountabilityService<R>>>,
    Path(slug): Path<String>,
) -> Response
where
    R: LeaderRepository + 'static,
{
    let slug = LeaderSlug(slug);
    match service.get(&slug) {
        Ok(record) => (StatusCode::OK, axum::Json(record.accountability_view())).into_response(),
        Err(AccountabilityServiceError::Repository(RepositoryError::NotFound)) => {
            not_found(&slug)
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn profile_handler<R>(
    State(service): State<Arc<LeaderAccountabilityService<R>>>,
    Path(slug): Path<String>,
    axum::Json(update): axum::Json<ProfileUpdate>,
) -> Response
where
    R: LeaderRepository + 'static,
{
    let slug = LeaderSlug(slug);
    match service.update_profile(&slug, update) {
        Ok(record) => (StatusCode::OK, axum::Json(record.accountability_view())).into_response(),
        Err(AccountabilityServiceError::Repository(RepositoryError::NotFound)) => {
            not_found(&slug)
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn evaluation_handler<R>(
    State(service): State<Arc<LeaderAccountabilityService<R>>>,
    Path(slug): Path<String>,
    axum::Json(entries): axum::Json<Vec<SubmittedAnswer>>,
) -> Response
where
    R: LeaderRepository + 'static,
{
    let slug = LeaderSlug(slug);
    let answers = answer_set_from_submission(&entries);
    match service.submit_evaluation(&slug, &answers) {
        Ok(breakdown) => (StatusCode::OK, axum::Json(breakdown)).into_response(),
        Err(AccountabilityServiceError::InvalidAnswer(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(AccountabilityServiceError::Repository(RepositoryError::NotFound)) => {
            not_found(&slug)
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn case_handler<R>(
    State(service): State<Arc<LeaderAccountabilityService<R>>>,
    Path(slug): Path<String>,
    axum::Json(case): axum::Json<CorruptionCase>,
) -> Response
where
    R: LeaderRepository + 'static,
{
    let slug = LeaderSlug(slug);
    match service.file_case(&slug, case) {
        Ok(record) => {
            (StatusCode::ACCEPTED, axum::Json(record.accountability_view())).into_response()
        }
        Err(AccountabilityServiceError::Repository(RepositoryError::NotFound)) => {
            not_found(&slug)
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn policy_handler<R>(
    State(service): State<Arc<LeaderAccountabilityService<R>>>,
    Path(slug): Path<String>,
    axum::Json(action): axum::Json<PolicyAction>,
) -> Response
where
    R: LeaderRepository + 'static,
{
    let slug = LeaderSlug(slug);
    match service.log_policy_decision(&slug, action) {
        Ok(record) => {
            (StatusCode::ACCEPTED, axum::Json(record.accountability_view())).into_response()
        }
        Err(AccountabilityServiceError::Repository(RepositoryError::NotFound)) => {
            not_found(&slug)
        }
        Err(other) => internal_error(other),
    }
}

fn not_found(slug: &LeaderSlug) -> Response {
    let payload = json!({
        "slug": slug.0,
        "error": "leader not found",
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: AccountabilityServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
