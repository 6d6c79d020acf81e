//! GetSessionFeedbackHandler - Feedback left on a completed session.

use std::sync::Arc;

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{Actor, SessionId};
use crate::domain::session::SessionError;
use crate::ports::{FeedbackReader, SessionRepository};

#[derive(Debug, Clone)]
pub struct GetSessionFeedbackQuery {
    pub session_id: SessionId,
}

pub struct GetSessionFeedbackHandler {
    repository: Arc<dyn SessionRepository>,
    feedback: Arc<dyn FeedbackReader>,
}

impl GetSessionFeedbackHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, feedback: Arc<dyn FeedbackReader>) -> Self {
        Self {
            repository,
            feedback,
        }
    }

    /// `Ok(None)` when the session exists but has no feedback yet.
    pub async fn handle(
        &self,
        query: GetSessionFeedbackQuery,
        actor: &Actor,
    ) -> Result<Option<Feedback>, SessionError> {
        let session = self
            .repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(query.session_id))?;

        session.authorize_view(actor)?;

        Ok(self.feedback.find_by_session(session.id()).await?)
    }
}
