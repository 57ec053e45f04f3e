use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::FsApplicationFormData;
use super::fees::calculate_fees;
use super::repository::{DraftId, DraftRepository, RepositoryError, SubmissionPublisher};
use super::service::{ApplicationServiceError, FsApplicationService, NavigationTarget};
use super::state::{FormAction, FormDataPatch};
use super::steps::StepId;

/// Router builder exposing the draft lifecycle and the stateless quote endpoints.
pub fn application_router<R, P>(service: Arc<FsApplicationService<R, P>>) -> Router
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    Router::new()
        .route("/api/v1/dfsa/applications", post(create_handler::<R, P>))
        .route(
            "/api/v1/dfsa/applications/:draft_id",
            get(view_handler::<R, P>).patch(patch_handler::<R, P>),
        )
        .route(
            "/api/v1/dfsa/applications/:draft_id/actions",
            post(action_handler::<R, P>),
        )
        .route(
            "/api/v1/dfsa/applications/:draft_id/steps/:step_id/complete",
            post(complete_step_handler::<R, P>),
        )
        .route(
            "/api/v1/dfsa/applications/:draft_id/navigation",
            post(navigation_handler::<R, P>),
        )
        .route(
            "/api/v1/dfsa/applications/:draft_id/submit",
            post(submit_handler::<R, P>),
        )
        .route("/api/v1/dfsa/fees/quote", post(fee_quote_handler))
        .route("/api/v1/dfsa/steps", post(steps_handler::<R, P>))
        .with_state(service)
}

pub(crate) async fn create_handler<R, P>(
    State(service): State<Arc<FsApplicationService<R, P>>>,
    payload: Option<axum::Json<FormDataPatch>>,
) -> Response
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    let initial = payload.map(|axum::Json(patch)| patch);
    match service.create_draft(initial) {
        Ok(record) => {
            let view = record.view(service.visibility());
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn view_handler<R, P>(
    State(service): State<Arc<FsApplicationService<R, P>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    match service.view(&DraftId(draft_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn patch_handler<R, P>(
    State(service): State<Arc<FsApplicationService<R, P>>>,
    Path(draft_id): Path<String>,
    axum::Json(patch): axum::Json<FormDataPatch>,
) -> Response
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    match service.patch(&DraftId(draft_id), patch) {
        Ok(record) => {
            let view = record.view(service.visibility());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn action_handler<R, P>(
    State(service): State<Arc<FsApplicationService<R, P>>>,
    Path(draft_id): Path<String>,
    axum::Json(action): axum::Json<FormAction>,
) -> Response
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    match service.apply(&DraftId(draft_id), action) {
        Ok(record) => {
            let view = record.view(service.visibility());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn complete_step_handler<R, P>(
    State(service): State<Arc<FsApplicationService<R, P>>>,
    Path((draft_id, step_id)): Path<(String, String)>,
) -> Response
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    let Some(step) = StepId::parse(&step_id) else {
        let payload = json!({
            "error": format!("unknown step {step_id}"),
        });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    };

    match service.mark_step_complete(&DraftId(draft_id), step) {
        Ok(record) => {
            let view = record.view(service.visibility());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn navigation_handler<R, P>(
    State(service): State<Arc<FsApplicationService<R, P>>>,
    Path(draft_id): Path<String>,
    axum::Json(target): axum::Json<NavigationTarget>,
) -> Response
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    match service.navigate(&DraftId(draft_id), target) {
        Ok(record) => {
            let view = record.view(service.visibility());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn submit_handler<R, P>(
    State(service): State<Arc<FsApplicationService<R, P>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    match service.submit(&DraftId(draft_id)) {
        Ok(application) => {
            let payload = json!({
                "reference": application.reference,
                "draftId": application.draft_id,
                "fees": application.fees,
                "submittedAt": application.submitted_at,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn fee_quote_handler(
    axum::Json(form): axum::Json<FsApplicationFormData>,
) -> Response {
    (StatusCode::OK, axum::Json(calculate_fees(&form))).into_response()
}

pub(crate) async fn steps_handler<R, P>(
    State(service): State<Arc<FsApplicationService<R, P>>>,
    axum::Json(form): axum::Json<FsApplicationFormData>,
) -> Response
where
    R: DraftRepository + 'static,
    P: SubmissionPublisher + 'static,
{
    let engine = service.visibility();
    let steps = engine.visible_steps(&form);
    let payload = json!({
        "hiddenFields": engine.hidden_fields(&steps, &form),
        "visibleSteps": steps.into_iter().map(StepId::definition).collect::<Vec<_>>(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn service_error_response(error: ApplicationServiceError) -> Response {
    let status = match &error {
        ApplicationServiceError::NotReady(_) | ApplicationServiceError::StepNotVisible(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ApplicationServiceError::AlreadySubmitted(_)
        | ApplicationServiceError::NavigationBlocked { .. }
        | ApplicationServiceError::Repository(
            RepositoryError::Conflict | RepositoryError::StatusChanged(_),
        ) => StatusCode::CONFLICT,
        ApplicationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ApplicationServiceError::Repository(RepositoryError::CapacityReached(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = match &error {
        ApplicationServiceError::NotReady(violations) => json!({
            "error": error.to_string(),
            "violations": violations.iter().map(ToString::to_string).collect::<Vec<_>>(),
        }),
        _ => json!({
            "error": error.to_string(),
        }),
    };

    (status, axum::Json(payload)).into_response()
}
