//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    book_session, cancel_session, complete_session, confirm_session, get_overview, get_session,
    get_session_feedback, list_sessions, SessionHandlers,
};

/// Creates the session router, to be nested under `/api/sessions`.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/", post(book_session).get(list_sessions))
        .route("/:id", get(get_session))
        .route("/:id/confirm", post(confirm_session))
        .route("/:id/cancel", post(cancel_session))
        .route("/:id/complete", post(complete_session))
        .route("/:id/feedback", get(get_session_feedback))
        .with_state(handlers)
}

/// Creates the overview router, to be nested under `/api/overview`.
pub fn overview_routes(handlers: SessionHandlers) -> Router {
    Router::new().route("/", get(get_overview)).with_state(handlers)
}
