//! Error bodies and status mapping shared by all routes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::session::SessionError;

/// Standard error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed.to_string(), message)
    }
}

/// Maps a domain error code onto an HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidSessionType | ErrorCode::InvalidRating => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorCode::SessionNotFound
        | ErrorCode::TherapistNotFound
        | ErrorCode::FeedbackNotFound
        | ErrorCode::NotificationNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition | ErrorCode::SlotConflict | ErrorCode::SlotNotOffered => {
            StatusCode::CONFLICT
        }
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::PaymentFailed => StatusCode::PAYMENT_REQUIRED,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error wrapper so handlers can return `Result<_, ApiError>` and use `?`.
#[derive(Debug)]
pub enum ApiError {
    Session(SessionError),
    Domain(DomainError),
    BadRequest(String),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            ApiError::Session(err) => (err.code(), err.message()),
            ApiError::Domain(err) => (err.code, err.message),
            ApiError::BadRequest(message) => (ErrorCode::ValidationFailed, message),
        };

        let status = status_for(code);
        if status.is_server_error() {
            // Internal detail stays in the logs
            tracing::error!(code = %code, error = %message, "request failed");
            return (
                status,
                Json(ErrorResponse::new(code.to_string(), "Internal server error")),
            )
                .into_response();
        }

        (status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
    }
}
