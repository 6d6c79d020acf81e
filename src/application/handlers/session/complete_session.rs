//! CompleteSessionHandler - Client leaves feedback, completing the session.

use std::sync::Arc;

use crate::domain::feedback::{Feedback, Rating};
use crate::domain::foundation::{CommandMetadata, EventId, SessionId};
use crate::domain::session::{Session, SessionCompleted, SessionError, SessionStatus};
use crate::ports::{EventPublisher, SessionRepository};

use super::publish::publish_committed;

#[derive(Debug, Clone)]
pub struct CompleteSessionCommand {
    pub session_id: SessionId,
    /// Raw star value; validated into a `Rating`.
    pub rating: i64,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CompleteSessionResult {
    pub session: Session,
    pub feedback: Feedback,
    pub event: SessionCompleted,
}

pub struct CompleteSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CompleteSessionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CompleteSessionResult, SessionError> {
        let actor = &metadata.actor;

        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;

        session.authorize_complete(actor)?;
        session.ensure_transition(SessionStatus::Completed)?;
        let rating = Rating::try_from_value(cmd.rating)
            .map_err(|_| SessionError::InvalidRating(cmd.rating))?;

        let (_, feedback) = session.complete(actor, rating, cmd.comment)?;

        // Status CAS and feedback insert commit together or not at all
        self.repository
            .complete_with_feedback(&session, &feedback)
            .await?;

        tracing::info!(
            session_id = %session.id(),
            actor_id = %actor.user_id,
            rating = rating.stars(),
            "session completed"
        );

        let event = SessionCompleted {
            event_id: EventId::new(),
            session_id: *session.id(),
            client_id: session.client_id().clone(),
            therapist_id: session.therapist_id().clone(),
            therapist_name: session.therapist_name().to_string(),
            slot: *session.slot(),
            rating: rating.stars(),
            completed_at: feedback.created_at,
        };
        publish_committed(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(CompleteSessionResult {
            session,
            feedback,
            event,
        })
    }
}
