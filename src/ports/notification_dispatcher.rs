//! Notification dispatch port.
//!
//! Dispatch is fire-and-forget from the lifecycle's point of view: callers
//! log failures and never roll back a committed transition because of one.

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;
use async_trait::async_trait;

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, notification: Notification) -> Result<(), DomainError>;
}

/// Per-user inbox queries and read-state updates.
#[async_trait]
pub trait NotificationInbox: Send + Sync {
    /// Newest first.
    async fn list_for(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError>;

    async fn unread_count(&self, user_id: &UserId) -> Result<u64, DomainError>;

    /// Marks one notification read.
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if the user has no such notification
    async fn mark_read(&self, user_id: &UserId, id: &NotificationId) -> Result<(), DomainError>;

    /// Marks every notification of the user read; returns how many changed.
    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64, DomainError>;

    /// Removes one notification.
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if the user has no such notification
    async fn delete(&self, user_id: &UserId, id: &NotificationId) -> Result<(), DomainError>;
}
