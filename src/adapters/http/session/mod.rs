//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BookSessionRequest, CompleteSessionRequest, CompletedSessionResponse, FeedbackResponse,
    ListSessionsParams, OverviewParams, OverviewResponse, SessionListResponse, SessionResponse,
};
pub use handlers::SessionHandlers;
pub use routes::{overview_routes, session_routes};
