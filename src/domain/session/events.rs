//! Session domain events.
//!
//! Published after each committed lifecycle change:
//! - `SessionBooked` - client reserved a slot
//! - `SessionConfirmed` - therapist accepted
//! - `SessionCancelled` - any permitted party cancelled
//! - `SessionCompleted` - client left feedback on a confirmed session

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, Role, SessionId, Timestamp, UserId};

use super::{Price, Session, SessionStatus, SessionType, Slot};

pub const SESSION_BOOKED: &str = "session.booked.v1";
pub const SESSION_CONFIRMED: &str = "session.confirmed.v1";
pub const SESSION_CANCELLED: &str = "session.cancelled.v1";
pub const SESSION_COMPLETED: &str = "session.completed.v1";

/// All lifecycle event types, for subscribers that want every change.
pub const SESSION_EVENT_TYPES: [&str; 4] = [
    SESSION_BOOKED,
    SESSION_CONFIRMED,
    SESSION_CANCELLED,
    SESSION_COMPLETED,
];

// ════════════════════════════════════════════════════════════════════════════
// SessionBooked
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBooked {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub client_id: UserId,
    pub therapist_id: UserId,
    pub therapist_name: String,
    pub slot: Slot,
    pub session_type: SessionType,
    pub price: Price,
    pub booked_at: Timestamp,
}

domain_event!(SessionBooked, "session.booked.v1", id = session_id, at = booked_at);

impl SessionBooked {
    pub fn from_session(session: &Session) -> Self {
        Self {
            event_id: EventId::new(),
            session_id: *session.id(),
            client_id: session.client_id().clone(),
            therapist_id: session.therapist_id().clone(),
            therapist_name: session.therapist_name().to_string(),
            slot: *session.slot(),
            session_type: session.session_type(),
            price: session.price(),
            booked_at: *session.created_at(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionConfirmed
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfirmed {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub client_id: UserId,
    pub therapist_id: UserId,
    pub therapist_name: String,
    pub slot: Slot,
    pub session_type: SessionType,
    /// Present only for online sessions.
    pub meet_link: Option<String>,
    pub confirmed_at: Timestamp,
}

domain_event!(SessionConfirmed, "session.confirmed.v1", id = session_id, at = confirmed_at);

impl SessionConfirmed {
    pub fn from_session(session: &Session) -> Self {
        Self {
            event_id: EventId::new(),
            session_id: *session.id(),
            client_id: session.client_id().clone(),
            therapist_id: session.therapist_id().clone(),
            therapist_name: session.therapist_name().to_string(),
            slot: *session.slot(),
            session_type: session.session_type(),
            meet_link: session.meet_link().map(str::to_string),
            confirmed_at: *session.updated_at(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionCancelled
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCancelled {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub client_id: UserId,
    pub therapist_id: UserId,
    pub therapist_name: String,
    pub slot: Slot,
    pub cancelled_by: UserId,
    pub cancelled_by_role: Role,
    /// Status before cancellation (pending or confirmed).
    pub previous_status: SessionStatus,
    pub late: bool,
    pub cancelled_at: Timestamp,
}

domain_event!(SessionCancelled, "session.cancelled.v1", id = session_id, at = cancelled_at);

// ════════════════════════════════════════════════════════════════════════════
// SessionCompleted
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCompleted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub client_id: UserId,
    pub therapist_id: UserId,
    pub therapist_name: String,
    pub slot: Slot,
    /// Stars given with the completing feedback.
    pub rating: u8,
    pub completed_at: Timestamp,
}

domain_event!(SessionCompleted, "session.completed.v1", id = session_id, at = completed_at);
