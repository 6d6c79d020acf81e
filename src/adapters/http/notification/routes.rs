//! HTTP routes for notification endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    delete_notification, list_notifications, mark_all_read, mark_read, unread_count, InboxState,
};

/// Creates the notification router, to be nested under `/api/notifications`.
pub fn notification_routes(inbox: InboxState) -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/read-all", post(mark_all_read))
        .route("/:id/read", post(mark_read))
        .route("/:id", delete(delete_notification))
        .with_state(inbox)
}
