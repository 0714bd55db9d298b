use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::AssessmentSubmission;
use super::service::{AssessmentService, AssessmentServiceError};
use super::store::RecordStore;

const SUBMIT_FAILURE_MESSAGE: &str = "Failed to save assessment. Please try again.";

/// Router builder exposing the quiz, submission, and admin endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route("/api/v1/questionnaire", get(questionnaire_handler::<S>))
        .route(
            "/api/v1/assessments",
            post(submit_handler::<S>).get(list_handler::<S>),
        )
        .route("/api/v1/assessments/preview", post(preview_handler::<S>))
        .route("/api/v1/assessments/export", get(export_handler::<S>))
        .route("/api/v1/emails", get(email_log_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRequest {
    #[serde(default)]
    pub(crate) responses: BTreeMap<String, i64>,
}

pub(crate) async fn questionnaire_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: RecordStore + 'static,
{
    let payload = json!({ "sections": service.questionnaire() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn preview_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    axum::Json(request): axum::Json<PreviewRequest>,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.preview(&request.responses) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    headers: HeaderMap,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    S: RecordStore + 'static,
{
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match service.submit(submission, user_agent) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(AssessmentServiceError::Storage(err)) => {
            error!(error = %err, "submission could not be stored");
            let payload = json!({ "error": SUBMIT_FAILURE_MESSAGE });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn list_handler<S>(State(service): State<Arc<AssessmentService<S>>>) -> Response
where
    S: RecordStore + 'static,
{
    match service.list_submissions() {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn email_log_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
) -> Response
where
    S: RecordStore + 'static,
{
    match service.list_email_log() {
        Ok(emails) => (StatusCode::OK, axum::Json(json!({ "emails": emails }))).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<S>(State(service): State<Arc<AssessmentService<S>>>) -> Response
where
    S: RecordStore + 'static,
{
    match service.export_csv() {
        Ok(csv) => {
            let disposition = format!(
                "attachment; filename=\"genai-maturity-assessments-{}.csv\"",
                chrono::Utc::now().format("%Y-%m-%d")
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: AssessmentServiceError) -> Response {
    let status = match &err {
        AssessmentServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Storage(_) | AssessmentServiceError::Export(_) => {
            error!(error = %err, "assessment request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
