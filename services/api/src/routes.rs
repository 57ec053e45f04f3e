use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use dfsa_wizard::workflows::fs_application::{
    application_router, steps_in_stage, DraftRepository, FsApplicationService,
    SubmissionPublisher, WizardStage,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_application_routes<R, P>(
    service: Arc<FsApplicationService<R, P>>,
) -> axum::Router
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    application_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/dfsa/catalog", axum::routing::get(catalog_endpoint))
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

/// Every step the wizard can show, grouped by stage.
pub(crate) async fn catalog_endpoint() -> Json<serde_json::Value> {
    let stages: Vec<serde_json::Value> = WizardStage::ordered()
        .into_iter()
        .map(|stage| {
            json!({
                "stage": stage,
                "label": stage.label(),
                "steps": steps_in_stage(stage),
            })
        })
        .collect();
    Json(json!({ "stages": stages }))
}
