//! GetSessionHandler - Query handler for one session's details.

use std::sync::Arc;

use crate::domain::foundation::{Actor, SessionId};
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

pub struct GetSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSessionQuery, actor: &Actor) -> Result<Session, SessionError> {
        let session = self
            .repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(query.session_id))?;

        session.authorize_view(actor)?;

        Ok(session)
    }
}
