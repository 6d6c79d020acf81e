use serde::{Deserialize, Serialize};

use crate::domain::foundation::{NotificationId, SessionId, Timestamp, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    pub read: bool,
    pub created_at: Timestamp,
}

impl Notification {
    pub fn new(
        recipient: UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            recipient,
            kind,
            title: title.into(),
            message: message.into(),
            session_id: None,
            read: false,
            created_at: Timestamp::now(),
        }
    }

    pub fn for_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unread_and_can_be_marked() {
        let mut n = Notification::new(
            UserId::new("client-1").unwrap(),
            NotificationKind::Success,
            "Session confirmed",
            "See you soon",
        );
        assert!(!n.read);
        n.mark_read();
        assert!(n.read);
    }

    #[test]
    fn session_link_is_omitted_when_absent() {
        let n = Notification::new(
            UserId::new("client-1").unwrap(),
            NotificationKind::Info,
            "Hello",
            "World",
        );
        let json = serde_json::to_value(&n).unwrap();
        assert!(json.get("session_id").is_none());
        assert_eq!(json["kind"], "info");
    }
}
