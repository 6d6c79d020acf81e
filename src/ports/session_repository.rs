//! Session repository port (write side).
//!
//! Every write is guarded so that concurrent callers cannot both win:
//! inserts enforce slot exclusivity, updates are compare-and-swap on the
//! status the caller read.

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use crate::domain::session::{Session, SessionStatus, Slot};
use async_trait::async_trait;

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a newly booked session.
    ///
    /// # Errors
    ///
    /// - `SlotConflict` if an active session already holds the therapist's slot
    ///   (details `date`, `time`)
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, session: &Session) -> Result<(), DomainError>;

    /// Persist the lifecycle fields of `session` only if the stored status is
    /// still `expected`.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the row does not exist (detail `session_id`)
    /// - `InvalidStateTransition` if the stored status moved on
    ///   (details `from`, `to`)
    /// - `DatabaseError` on persistence failure
    async fn update_if_status(
        &self,
        session: &Session,
        expected: SessionStatus,
    ) -> Result<(), DomainError>;

    /// Move a confirmed session to completed and store its feedback in one
    /// atomic step. Same errors as `update_if_status` with `expected =
    /// Confirmed`; neither write happens if either fails.
    async fn complete_with_feedback(
        &self,
        session: &Session,
        feedback: &Feedback,
    ) -> Result<(), DomainError>;

    /// Find a session by its ID.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// The active session holding a therapist's slot, if any.
    async fn find_active_in_slot(
        &self,
        therapist_id: &UserId,
        slot: &Slot,
    ) -> Result<Option<Session>, DomainError>;
}

/// `SlotConflict` carrying the contested slot.
pub fn slot_conflict_error(slot: &Slot) -> DomainError {
    DomainError::new(ErrorCode::SlotConflict, format!("slot {} is already booked", slot))
        .with_detail("date", slot.date_string())
        .with_detail("time", slot.time_string())
}

pub fn session_not_found_error(id: &SessionId) -> DomainError {
    DomainError::new(ErrorCode::SessionNotFound, format!("session {} not found", id))
        .with_detail("session_id", id.to_string())
}

/// A compare-and-swap lost: the stored status is `found`, not the one read.
pub fn stale_status_error(found: SessionStatus, target: SessionStatus) -> DomainError {
    DomainError::new(
        ErrorCode::InvalidStateTransition,
        format!("session is {} and cannot become {}", found, target),
    )
    .with_detail("from", found.as_str())
    .with_detail("to", target.as_str())
}
