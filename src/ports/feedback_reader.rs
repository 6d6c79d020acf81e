//! Feedback reader port.
//!
//! Feedback is written only through `SessionRepository::complete_with_feedback`;
//! this port covers the read side.

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{DomainError, SessionId};
use async_trait::async_trait;

#[async_trait]
pub trait FeedbackReader: Send + Sync {
    async fn find_by_session(&self, session_id: &SessionId)
        -> Result<Option<Feedback>, DomainError>;

    /// Feedback for any of the given sessions.
    async fn find_for_sessions(&self, session_ids: &[SessionId])
        -> Result<Vec<Feedback>, DomainError>;
}
