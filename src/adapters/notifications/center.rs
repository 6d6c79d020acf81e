//! In-memory notification center.
//!
//! Keeps each user's notifications newest first, capped per user. It is both
//! the dispatcher the event handlers write to and the inbox the HTTP layer
//! reads from.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::{NotificationDispatcher, NotificationInbox};

const DEFAULT_PER_USER: usize = 100;

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    inboxes: Arc<RwLock<HashMap<UserId, VecDeque<Notification>>>>,
    per_user: usize,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_PER_USER)
    }

    /// Oldest notifications are dropped once a user has `per_user`.
    pub fn with_capacity(per_user: usize) -> Self {
        Self {
            inboxes: Arc::new(RwLock::new(HashMap::new())),
            per_user: per_user.max(1),
        }
    }

    fn not_found(id: &NotificationId) -> DomainError {
        DomainError::new(ErrorCode::NotificationNotFound, format!("notification {} not found", id))
            .with_detail("notification_id", id.to_string())
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationDispatcher for NotificationCenter {
    async fn dispatch(&self, notification: Notification) -> Result<(), DomainError> {
        let mut inboxes = self.inboxes.write().await;
        let inbox = inboxes.entry(notification.recipient.clone()).or_default();
        inbox.push_front(notification);
        inbox.truncate(self.per_user);
        Ok(())
    }
}

#[async_trait]
impl NotificationInbox for NotificationCenter {
    async fn list_for(&self, user_id: &UserId) -> Result<Vec<Notification>, DomainError> {
        Ok(self
            .inboxes
            .read()
            .await
            .get(user_id)
            .map(|inbox| inbox.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn unread_count(&self, user_id: &UserId) -> Result<u64, DomainError> {
        Ok(self
            .inboxes
            .read()
            .await
            .get(user_id)
            .map(|inbox| inbox.iter().filter(|n| !n.read).count() as u64)
            .unwrap_or(0))
    }

    async fn mark_read(&self, user_id: &UserId, id: &NotificationId) -> Result<(), DomainError> {
        let mut inboxes = self.inboxes.write().await;
        let notification = inboxes
            .get_mut(user_id)
            .and_then(|inbox| inbox.iter_mut().find(|n| &n.id == id))
            .ok_or_else(|| Self::not_found(id))?;
        notification.mark_read();
        Ok(())
    }

    async fn mark_all_read(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let mut inboxes = self.inboxes.write().await;
        let mut changed = 0;
        if let Some(inbox) = inboxes.get_mut(user_id) {
            for notification in inbox.iter_mut().filter(|n| !n.read) {
                notification.mark_read();
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn delete(&self, user_id: &UserId, id: &NotificationId) -> Result<(), DomainError> {
        let mut inboxes = self.inboxes.write().await;
        let inbox = inboxes.get_mut(user_id).ok_or_else(|| Self::not_found(id))?;
        let position = inbox
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        inbox.remove(position);
        Ok(())
    }
}
