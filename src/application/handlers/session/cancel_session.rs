//! CancelSessionHandler - Client, therapist or admin cancels an active session.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, EventId, SessionId, Timestamp};
use crate::domain::session::{Session, SessionCancelled, SessionError};
use crate::ports::{EventPublisher, SessionRepository};

use super::publish::publish_committed;

#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct CancelSessionResult {
    pub session: Session,
    pub event: SessionCancelled,
}

pub struct CancelSessionHandler {
    repository: Arc<dyn SessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    late_window_hours: i64,
}

impl CancelSessionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        late_window_hours: i64,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            late_window_hours,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelSessionResult, SessionError> {
        let actor = &metadata.actor;

        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;

        let now = Timestamp::now();
        let previous = session.cancel(actor, now, self.late_window_hours)?;
        self.repository.update_if_status(&session, previous).await?;

        tracing::info!(
            session_id = %session.id(),
            actor_id = %actor.user_id,
            previous = %previous,
            late = session.is_late_cancellation(),
            "session cancelled"
        );

        let event = SessionCancelled {
            event_id: EventId::new(),
            session_id: *session.id(),
            client_id: session.client_id().clone(),
            therapist_id: session.therapist_id().clone(),
            therapist_name: session.therapist_name().to_string(),
            slot: *session.slot(),
            cancelled_by: actor.user_id.clone(),
            cancelled_by_role: actor.role,
            previous_status: previous,
            late: session.is_late_cancellation(),
            cancelled_at: now,
        };
        publish_committed(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(CancelSessionResult { session, event })
    }
}
