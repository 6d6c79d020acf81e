//! In-memory session store.
//!
//! Sessions and feedback live behind one mutex, so the slot check and the
//! insert, and the status compare and the swap, are each one critical
//! section. That gives the same exclusivity the Postgres adapter gets from
//! its partial unique index and conditional updates.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::session::{Session, SessionStatus, Slot};
use crate::ports::{
    session_not_found_error, slot_conflict_error, stale_status_error, FeedbackReader, ListOptions,
    SessionList, SessionReader, SessionRepository, SessionScope,
};

#[derive(Default)]
struct StoreState {
    sessions: HashMap<SessionId, Session>,
    feedback: HashMap<SessionId, Feedback>,
}

impl StoreState {
    fn active_in_slot(&self, therapist_id: &UserId, slot: &Slot) -> Option<&Session> {
        self.sessions
            .values()
            .find(|s| s.therapist_id() == therapist_id && s.slot() == slot && s.is_active())
    }

    /// Checks the stored status and, if it is still `expected`, replaces the row.
    fn swap(&mut self, session: &Session, expected: SessionStatus) -> Result<(), DomainError> {
        let stored = self
            .sessions
            .get_mut(session.id())
            .ok_or_else(|| session_not_found_error(session.id()))?;
        if stored.status() != expected {
            return Err(stale_status_error(stored.status(), session.status()));
        }
        *stored = session.clone();
        Ok(())
    }

    /// Newest booking first; id breaks ties so paging is stable.
    fn in_scope(&self, scope: &SessionScope) -> Vec<Session> {
        let mut sessions: Vec<Session> = self
            .sessions
            .values()
            .filter(|s| scope.includes(s))
            .cloned()
            .collect();
        sessions.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });
        sessions
    }
}

/// Session repository, reader and feedback reader over process memory.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn session_count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    pub async fn feedback_count(&self) -> usize {
        self.state.lock().await.feedback.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        if session.is_active()
            && state
                .active_in_slot(session.therapist_id(), session.slot())
                .is_some()
        {
            return Err(slot_conflict_error(session.slot()));
        }
        state.sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update_if_status(
        &self,
        session: &Session,
        expected: SessionStatus,
    ) -> Result<(), DomainError> {
        self.state.lock().await.swap(session, expected)
    }

    async fn complete_with_feedback(
        &self,
        session: &Session,
        feedback: &Feedback,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        state.swap(session, SessionStatus::Confirmed)?;
        state.feedback.insert(feedback.session_id, feedback.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.state.lock().await.sessions.get(id).cloned())
    }

    async fn find_active_in_slot(
        &self,
        therapist_id: &UserId,
        slot: &Slot,
    ) -> Result<Option<Session>, DomainError> {
        Ok(self
            .state
            .lock()
            .await
            .active_in_slot(therapist_id, slot)
            .cloned())
    }
}

#[async_trait]
impl SessionReader for InMemorySessionStore {
    async fn list(
        &self,
        scope: &SessionScope,
        options: &ListOptions,
    ) -> Result<SessionList, DomainError> {
        let sessions = self.state.lock().await.in_scope(scope);
        Ok(options.apply(sessions))
    }

    async fn all_in_scope(&self, scope: &SessionScope) -> Result<Vec<Session>, DomainError> {
        Ok(self.state.lock().await.in_scope(scope))
    }
}

#[async_trait]
impl FeedbackReader for InMemorySessionStore {
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Feedback>, DomainError> {
        Ok(self.state.lock().await.feedback.get(session_id).cloned())
    }

    async fn find_for_sessions(
        &self,
        session_ids: &[SessionId],
    ) -> Result<Vec<Feedback>, DomainError> {
        let state = self.state.lock().await;
        Ok(session_ids
            .iter()
            .filter_map(|id| state.feedback.get(id).cloned())
            .collect())
    }
}
