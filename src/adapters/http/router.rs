//! Application router: routes, auth and the shared middleware stack.
//!
//! `main.rs` and the HTTP integration tests build the app through
//! [`build_app_router`] so both run the same stack.

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::ports::NotificationInbox;

use super::middleware::{auth_middleware, AuthState};
use super::notification::notification_routes;
use super::session::{overview_routes, session_routes, SessionHandlers};

/// Everything the HTTP layer needs from the composition root.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionHandlers,
    pub inbox: Arc<dyn NotificationInbox>,
    pub auth: AuthState,
}

/// Options for the outer middleware stack.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    pub request_timeout: Duration,
    pub cors_origins: Vec<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the full application router.
///
/// Layers apply bottom-up: CORS, request id, tracing, request id
/// propagation, timeout, compression.
pub fn build_app_router(state: AppState, options: &RouterOptions) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let api = Router::new()
        .nest("/sessions", session_routes(state.sessions.clone()))
        .nest("/overview", overview_routes(state.sessions.clone()))
        .nest("/notifications", notification_routes(state.inbox.clone()))
        .layer(middleware::from_fn_with_state(state.auth.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(&options.cors_origins))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Origins that fail to parse are logged and skipped.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}
