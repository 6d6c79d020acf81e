//! HTTP handlers for notification endpoints.
//!
//! Every endpoint works on the caller's own inbox only.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::domain::foundation::NotificationId;
use crate::domain::notification::Notification;
use crate::ports::NotificationInbox;

pub type InboxState = Arc<dyn NotificationInbox>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub items: Vec<Notification>,
    pub unread: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

fn parse_notification_id(raw: &str) -> Result<NotificationId, ApiError> {
    raw.parse::<NotificationId>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid notification ID: {}", raw)))
}

/// GET /api/notifications
pub async fn list_notifications(
    State(inbox): State<InboxState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let items = inbox.list_for(&user.id).await?;
    let unread = items.iter().filter(|n| !n.read).count() as u64;
    Ok(Json(NotificationListResponse { items, unread }))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(inbox): State<InboxState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let unread = inbox.unread_count(&user.id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// POST /api/notifications/:id/read
pub async fn mark_read(
    State(inbox): State<InboxState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_notification_id(&id)?;
    inbox.mark_read(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    State(inbox): State<InboxState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let updated = inbox.mark_all_read(&user.id).await?;
    Ok(Json(MarkAllReadResponse { updated }))
}

/// DELETE /api/notifications/:id
pub async fn delete_notification(
    State(inbox): State<InboxState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_notification_id(&id)?;
    inbox.delete(&user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
