use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::answers::{AnswerUpdateRequest, RawAnswers};
use super::repository::{RepositoryError, SessionId, SessionRepository};
use super::service::{ScreeningService, ScreeningServiceError};

/// Router builder exposing screening sessions and stateless classification.
pub fn screening_router<R>(service: Arc<ScreeningService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/screenings", post(start_handler::<R>))
        .route(
            "/api/v1/screenings/:session_id",
            get(status_handler::<R>).delete(end_handler::<R>),
        )
        .route(
            "/api/v1/screenings/:session_id/answers",
            post(answer_handler::<R>),
        )
        .route(
            "/api/v1/screenings/:session_id/reset",
            post(reset_handler::<R>),
        )
        .route("/api/v1/classify", post(classify_handler::<R>))
        .with_state(service)
}

pub(crate) async fn start_handler<R>(State(service): State<Arc<ScreeningService<R>>>) -> Response
where
    R: SessionRepository + 'static,
{
    match service.start() {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<ScreeningService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn answer_handler<R>(
    State(service): State<Arc<ScreeningService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<AnswerUpdateRequest>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.apply_request(&SessionId(session_id), &request) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_handler<R>(
    State(service): State<Arc<ScreeningService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.reset(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn end_handler<R>(
    State(service): State<Arc<ScreeningService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.end(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn classify_handler<R>(
    State(service): State<Arc<ScreeningService<R>>>,
    axum::Json(answers): axum::Json<RawAnswers>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.classify_raw(answers) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

impl ScreeningServiceError {
    /// HTTP status shared by the screening routes and `AppError`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScreeningServiceError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ScreeningServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            ScreeningServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            ScreeningServiceError::Repository(RepositoryError::CapacityExceeded(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ScreeningServiceError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn error_response(error: ScreeningServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}
