//! ConfirmSessionHandler - Therapist accepts a pending session.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SessionId};
use crate::domain::session::{Session, SessionConfirmed, SessionError, SessionStatus};
use crate::ports::{EventPublisher, MeetingLinkProvider, SessionRepository};

use super::publish::publish_committed;

#[derive(Debug, Clone)]
pub struct ConfirmSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct ConfirmSessionResult {
    pub session: Session,
    pub event: SessionConfirmed,
}

pub struct ConfirmSessionHandler {
    repository: Arc<dyn SessionRepository>,
    links: Arc<dyn MeetingLinkProvider>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ConfirmSessionHandler {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        links: Arc<dyn MeetingLinkProvider>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            links,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<ConfirmSessionResult, SessionError> {
        let actor = &metadata.actor;

        // 1. Load
        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;

        // 2. Check before issuing a link
        session.authorize_confirm(actor)?;
        session.ensure_transition(SessionStatus::Confirmed)?;

        let link = if session.session_type().needs_meeting_link() {
            Some(self.links.create_link(&session).await?)
        } else {
            None
        };

        // 3. Transition, then compare-and-swap on the status we read
        let previous = session.confirm(actor, link)?;
        self.repository.update_if_status(&session, previous).await?;

        tracing::info!(
            session_id = %session.id(),
            actor_id = %actor.user_id,
            status = %session.status(),
            "session confirmed"
        );

        // 4. Publish
        let event = SessionConfirmed::from_session(&session);
        publish_committed(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(ConfirmSessionResult { session, event })
    }
}
