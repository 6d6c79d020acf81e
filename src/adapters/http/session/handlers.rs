//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::session::{
    BookSessionCommand, BookSessionHandler, CancelSessionCommand, CancelSessionHandler,
    CompleteSessionCommand, CompleteSessionHandler, ConfirmSessionCommand, ConfirmSessionHandler,
    GetSessionFeedbackHandler, GetSessionFeedbackQuery, GetSessionHandler,
    GetSessionOverviewHandler, GetSessionOverviewQuery, GetSessionQuery, ListSessionsHandler,
    ListSessionsQuery,
};
use crate::domain::foundation::{
    AuthenticatedUser, CommandMetadata, DomainError, ErrorCode, SessionId, UserId,
};

use super::dto::{
    BookSessionRequest, CompleteSessionRequest, CompletedSessionResponse, FeedbackResponse,
    ListSessionsParams, OverviewParams, OverviewResponse, SessionListResponse, SessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    pub book: Arc<BookSessionHandler>,
    pub confirm: Arc<ConfirmSessionHandler>,
    pub cancel: Arc<CancelSessionHandler>,
    pub complete: Arc<CompleteSessionHandler>,
    pub get: Arc<GetSessionHandler>,
    pub list: Arc<ListSessionsHandler>,
    pub feedback: Arc<GetSessionFeedbackHandler>,
    pub overview: Arc<GetSessionOverviewHandler>,
}

const REQUEST_ID_HEADER: &str = "x-request-id";

fn metadata_for(user: &AuthenticatedUser, headers: &HeaderMap) -> CommandMetadata {
    let metadata = CommandMetadata::new(user.actor()).with_source("http");
    match headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
        Some(id) => metadata.with_correlation_id(id),
        None => metadata,
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    raw.parse::<SessionId>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid session ID: {}", raw)))
}

fn parse_user_id(field: &str, raw: String) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|e| ApiError::BadRequest(format!("Invalid {}: {}", field, e)))
}

// ════════════════════════════════════════════════════════════════════════════
// Commands
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Book a session
pub async fn book_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Json(req): Json<BookSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = BookSessionCommand {
        therapist_id: parse_user_id("therapist_id", req.therapist_id)?,
        date: req.date,
        time: req.time,
        session_type: req.session_type,
    };

    let result = handlers.book.handle(cmd, metadata_for(&user, &headers)).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(&result.session))))
}

/// POST /api/sessions/:id/confirm - Therapist confirms
pub async fn confirm_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ConfirmSessionCommand {
        session_id: parse_session_id(&session_id)?,
    };
    let result = handlers.confirm.handle(cmd, metadata_for(&user, &headers)).await?;
    Ok(Json(SessionResponse::from(&result.session)))
}

/// POST /api/sessions/:id/cancel - A participant or admin cancels
pub async fn cancel_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CancelSessionCommand {
        session_id: parse_session_id(&session_id)?,
    };
    let result = handlers.cancel.handle(cmd, metadata_for(&user, &headers)).await?;
    Ok(Json(SessionResponse::from(&result.session)))
}

/// POST /api/sessions/:id/complete - Client leaves feedback
pub async fn complete_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path(session_id): Path<String>,
    Json(req): Json<CompleteSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CompleteSessionCommand {
        session_id: parse_session_id(&session_id)?,
        rating: req.rating,
        comment: req.comment,
    };
    let result = handlers.complete.handle(cmd, metadata_for(&user, &headers)).await?;
    Ok(Json(CompletedSessionResponse {
        session: SessionResponse::from(&result.session),
        feedback: FeedbackResponse::from(&result.feedback),
    }))
}

// ════════════════════════════════════════════════════════════════════════════
// Queries
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions - Sessions visible to the caller
pub async fn list_sessions(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListSessionsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListSessionsQuery {
        page: params.page,
        per_page: params.per_page,
        status: params.status,
    };
    let list = handlers.list.handle(query, &user.actor()).await?;
    Ok(Json(SessionListResponse::from(list)))
}

/// GET /api/sessions/:id
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetSessionQuery {
        session_id: parse_session_id(&session_id)?,
    };
    let session = handlers.get.handle(query, &user.actor()).await?;
    Ok(Json(SessionResponse::from(&session)))
}

/// GET /api/sessions/:id/feedback
pub async fn get_session_feedback(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let feedback = handlers
        .feedback
        .handle(GetSessionFeedbackQuery { session_id }, &user.actor())
        .await?
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::FeedbackNotFound,
                format!("No feedback for session {}", session_id),
            )
        })?;
    Ok(Json(FeedbackResponse::from(&feedback)))
}

/// GET /api/overview - Dashboard figures for therapists and admins
pub async fn get_overview(
    State(handlers): State<SessionHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<OverviewParams>,
) -> Result<impl IntoResponse, ApiError> {
    let therapist_id = params
        .therapist_id
        .map(|raw| parse_user_id("therapist_id", raw))
        .transpose()?;
    let overview = handlers
        .overview
        .handle(GetSessionOverviewQuery { therapist_id }, &user.actor())
        .await?;
    Ok(Json(OverviewResponse::from(overview)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Role;

    #[test]
    fn request_id_becomes_correlation_id() {
        let user = AuthenticatedUser::new(UserId::new("client-1").unwrap(), Role::Client);
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, "req-42".parse().unwrap());

        let metadata = metadata_for(&user, &headers);
        assert_eq!(metadata.correlation_id_opt(), Some("req-42"));
        assert_eq!(metadata.source(), Some("http"));
        assert_eq!(metadata.actor.role, Role::Client);
    }

    #[test]
    fn malformed_session_id_is_bad_request() {
        assert!(matches!(parse_session_id("not-a-uuid"), Err(ApiError::BadRequest(_))));
    }
}
