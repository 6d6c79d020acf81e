//! HTTP adapter for the per-user notification inbox.

mod handlers;
mod routes;

pub use handlers::{NotificationListResponse, UnreadCountResponse};
pub use routes::notification_routes;
