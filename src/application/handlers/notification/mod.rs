//! Event handlers that turn lifecycle events into user notifications.

mod session_notifier;

pub use session_notifier::SessionNotificationHandler;
