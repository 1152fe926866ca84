use std::sync::Arc;

use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::json;

use civicwatch::workflows::accountability::{
    leader_router, LeaderAccountabilityService, LeaderRepository, LeaderSlug,
};
use civicwatch::workflows::imports::PolicyDecisionImporter;

use crate::infra::AppState;

pub(crate) fn with_leader_routes<R>(service: Arc<LeaderAccountabilityService<R>>) -> axum::Router
where
    R: LeaderRepository + 'static,
{
    let import_service = service.clone();
    leader_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/leaders/:slug/policies/import",
            axum::routing::post(
                move |path: Path<String>, payload: Json<PolicyImportRequest>| {
                    policy_import_endpoint(import_service.clone(), path, payload)
                },
            ),
        )
}

#[derive(Debug, Deserialize)]
pub(crate) struct PolicyImportRequest {
    pub(crate) csv: String,
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn policy_import_endpoint<R>(
    service: Arc<LeaderAccountabilityService<R>>,
    Path(slug): Path<String>,
    Json(payload): Json<PolicyImportRequest>,
) -> impl IntoResponse
where
    R: LeaderRepository + 'static,
{
    let slug = LeaderSlug(slug);

    let actions = match PolicyDecisionImporter::from_reader(payload.csv.as_bytes()) {
        Ok(actions) => actions,
        Err(err) => {
            let body = Json(json!({ "error": err.to_string() }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }
    };
    let imported = actions.len();

    match service.log_policy_decisions(&slug, actions) {
        Ok(record) => {
            let body = Json(json!({
                "imported": imported,
                "view": record.accountability_view(),
            }));
            (StatusCode::OK, body).into_response()
        }
        Err(err) => {
            let body = Json(json!({ "error": err.to_string() }));
            (StatusCode::NOT_FOUND, body).into_response()
        }
    }
}
