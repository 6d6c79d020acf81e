//! Notification adapters.

mod center;

pub use center::NotificationCenter;
