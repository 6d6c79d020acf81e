//! In-app notifications raised by session lifecycle changes.

mod message;

pub use message::{Notification, NotificationKind};
