//! Session aggregate entity.
//!
//! A session is one booked appointment between a client and a therapist.
//! Slot, type, price and participants are fixed at booking; only the
//! lifecycle fields change afterwards, and only through `confirm`,
//! `cancel` and `complete`.

use serde::{Deserialize, Serialize};

use crate::domain::feedback::{Feedback, Rating};
use crate::domain::foundation::{
    Actor, SessionId, StateMachine, Timestamp, UserId,
};

use super::{Price, SessionError, SessionStatus, SessionType, Slot};

/// Everything needed to book a session once therapist lookup and payment
/// authorization have succeeded.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub client_id: UserId,
    pub therapist_id: UserId,
    pub therapist_name: String,
    pub slot: Slot,
    pub session_type: SessionType,
    pub price: Price,
    pub payment_transaction_id: Option<String>,
}

/// Persisted form of a session, used by adapters to rebuild the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub client_id: UserId,
    pub therapist_id: UserId,
    pub therapist_name: String,
    pub slot: Slot,
    pub session_type: SessionType,
    pub price: Price,
    pub status: SessionStatus,
    pub meet_link: Option<String>,
    pub payment_transaction_id: Option<String>,
    pub cancelled_by: Option<UserId>,
    pub late_cancellation: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Session aggregate.
///
/// # Invariants
///
/// - status only moves along the edges of `SessionStatus`
/// - `meet_link` is set iff the session is online and confirmed or completed
/// - slot, type, price, client and therapist never change after booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    client_id: UserId,
    therapist_id: UserId,
    therapist_name: String,
    slot: Slot,
    session_type: SessionType,
    price: Price,
    status: SessionStatus,
    meet_link: Option<String>,
    payment_transaction_id: Option<String>,
    cancelled_by: Option<UserId>,
    late_cancellation: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Books a new session in `pending`.
    pub fn book(id: SessionId, new: NewSession) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            client_id: new.client_id,
            therapist_id: new.therapist_id,
            therapist_name: new.therapist_name,
            slot: new.slot,
            session_type: new.session_type,
            price: new.price,
            status: SessionStatus::Pending,
            meet_link: None,
            payment_transaction_id: new.payment_transaction_id,
            cancelled_by: None,
            late_cancellation: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(snapshot: SessionSnapshot) -> Self {
        Self {
            id: snapshot.id,
            client_id: snapshot.client_id,
            therapist_id: snapshot.therapist_id,
            therapist_name: snapshot.therapist_name,
            slot: snapshot.slot,
            session_type: snapshot.session_type,
            price: snapshot.price,
            status: snapshot.status,
            meet_link: snapshot.meet_link,
            payment_transaction_id: snapshot.payment_transaction_id,
            cancelled_by: snapshot.cancelled_by,
            late_cancellation: snapshot.late_cancellation,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            client_id: self.client_id.clone(),
            therapist_id: self.therapist_id.clone(),
            therapist_name: self.therapist_name.clone(),
            slot: self.slot,
            session_type: self.session_type,
            price: self.price,
            status: self.status,
            meet_link: self.meet_link.clone(),
            payment_transaction_id: self.payment_transaction_id.clone(),
            cancelled_by: self.cancelled_by.clone(),
            late_cancellation: self.late_cancellation,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn client_id(&self) -> &UserId {
        &self.client_id
    }

    pub fn therapist_id(&self) -> &UserId {
        &self.therapist_id
    }

    pub fn therapist_name(&self) -> &str {
        &self.therapist_name
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn meet_link(&self) -> Option<&str> {
        self.meet_link.as_deref()
    }

    pub fn payment_transaction_id(&self) -> Option<&str> {
        self.payment_transaction_id.as_deref()
    }

    /// Who cancelled the session, if it was cancelled.
    pub fn cancelled_by(&self) -> Option<&UserId> {
        self.cancelled_by.as_ref()
    }

    /// True when the cancellation happened inside the late-cancellation window.
    pub fn is_late_cancellation(&self) -> bool {
        self.late_cancellation
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Active sessions hold their slot.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_participant(&self, user_id: &UserId) -> bool {
        &self.client_id == user_id || &self.therapist_id == user_id
    }

    /// Participants and admins may read a session.
    pub fn authorize_view(&self, actor: &Actor) -> Result<(), SessionError> {
        if actor.is_admin() || self.is_participant(&actor.user_id) {
            Ok(())
        } else {
            Err(SessionError::not_authorized("only participants may view this session"))
        }
    }

    /// Only the session's therapist may confirm.
    pub fn authorize_confirm(&self, actor: &Actor) -> Result<(), SessionError> {
        if actor.user_id == self.therapist_id {
            Ok(())
        } else {
            Err(SessionError::not_authorized("only the session's therapist may confirm"))
        }
    }

    /// Client, therapist, or any admin may cancel.
    pub fn authorize_cancel(&self, actor: &Actor) -> Result<(), SessionError> {
        if actor.is_admin() || self.is_participant(&actor.user_id) {
            Ok(())
        } else {
            Err(SessionError::not_authorized(
                "only participants or an admin may cancel",
            ))
        }
    }

    /// Only the session's client may complete (by leaving feedback).
    pub fn authorize_complete(&self, actor: &Actor) -> Result<(), SessionError> {
        if actor.user_id == self.client_id {
            Ok(())
        } else {
            Err(SessionError::not_authorized("only the session's client may leave feedback"))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Confirms a pending session. Online sessions must be given a link;
    /// any link passed for an in-person session is ignored.
    ///
    /// Returns the status the session had before, for compare-and-swap.
    pub fn confirm(
        &mut self,
        actor: &Actor,
        meet_link: Option<String>,
    ) -> Result<SessionStatus, SessionError> {
        self.authorize_confirm(actor)?;
        let previous = self.ensure_transition(SessionStatus::Confirmed)?;

        let meet_link = if self.session_type.needs_meeting_link() {
            match meet_link.filter(|link| !link.trim().is_empty()) {
                Some(link) => Some(link),
                None => {
                    return Err(SessionError::validation(
                        "meet_link",
                        "online sessions need a meeting link",
                    ))
                }
            }
        } else {
            None
        };

        self.status = SessionStatus::Confirmed;
        self.meet_link = meet_link;
        self.updated_at = Timestamp::now();
        Ok(previous)
    }

    /// Cancels a pending or confirmed session.
    ///
    /// Cancelling within `late_window_hours` of the start (or after it) is
    /// recorded as late; it is never refused for that reason.
    pub fn cancel(
        &mut self,
        actor: &Actor,
        now: Timestamp,
        late_window_hours: i64,
    ) -> Result<SessionStatus, SessionError> {
        self.authorize_cancel(actor)?;
        let previous = self.ensure_transition(SessionStatus::Cancelled)?;

        let deadline = self.slot.starts_at().add_hours(-late_window_hours);

        self.status = SessionStatus::Cancelled;
        self.meet_link = None;
        self.cancelled_by = Some(actor.user_id.clone());
        self.late_cancellation = !now.is_before(&deadline);
        self.updated_at = now;
        Ok(previous)
    }

    /// Completes a confirmed session and produces its feedback record.
    pub fn complete(
        &mut self,
        actor: &Actor,
        rating: Rating,
        comment: Option<String>,
    ) -> Result<(SessionStatus, Feedback), SessionError> {
        self.authorize_complete(actor)?;
        let previous = self.ensure_transition(SessionStatus::Completed)?;

        let feedback = Feedback::new(
            self.id,
            self.client_id.clone(),
            self.therapist_id.clone(),
            rating,
            comment,
        )?;

        self.status = SessionStatus::Completed;
        self.updated_at = Timestamp::now();
        Ok((previous, feedback))
    }

    /// Checks that the current status permits moving to `target`.
    pub fn ensure_transition(&self, target: SessionStatus) -> Result<SessionStatus, SessionError> {
        self.status
            .transition_to(target)
            .map(|_| self.status)
            .map_err(|_| SessionError::invalid_transition(self.status, target))
    }
}
