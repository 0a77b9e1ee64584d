use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use authpilot_letters::error::LetterError;
use authpilot_scoring::readiness::{AggregateValidationError, FieldIssue};
use authpilot_session::error::{FileIntakeError, SessionError};

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// The form is not ready for a letter; every blocking issue is listed.
    Incomplete(AggregateValidationError),
    Conflict(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<FieldIssue>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, issues) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            ApiError::Incomplete(err) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string(), err.issues)
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    Vec::new(),
                )
            }
        };

        (status, Json(ErrorBody { error: message, issues })).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Validation(err) => ApiError::Incomplete(err),
            SessionError::Intake(err) => err.into(),
            SessionError::Core(err) => ApiError::BadRequest(err.to_string()),
            SessionError::UnknownCase(id) => ApiError::NotFound(format!("denied case not found: {id}")),
            err @ SessionError::GenerationInFlight => ApiError::Conflict(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<FileIntakeError> for ApiError {
    fn from(e: FileIntakeError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<LetterError> for ApiError {
    fn from(e: LetterError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
