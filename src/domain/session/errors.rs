//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId, ValidationError};

use super::{SessionStatus, SessionType, Slot};

/// Errors raised by session lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// The actor may not perform this operation on this session.
    NotAuthorized(String),
    /// The current status does not permit the requested transition.
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },
    /// Another active session already holds the slot.
    SlotConflict(Slot),
    /// The therapist does not offer the requested slot.
    SlotNotOffered(Slot),
    TherapistNotFound(UserId),
    /// Requested delivery mode is not offered by the therapist.
    InvalidSessionType(SessionType),
    /// Feedback rating outside 1..=5.
    InvalidRating(i64),
    /// Payment authorization was declined or failed.
    PaymentFailed(String),
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn not_authorized(reason: impl Into<String>) -> Self {
        SessionError::NotAuthorized(reason.into())
    }
    pub fn invalid_transition(from: SessionStatus, to: SessionStatus) -> Self {
        SessionError::InvalidTransition { from, to }
    }
    pub fn slot_conflict(slot: Slot) -> Self {
        SessionError::SlotConflict(slot)
    }
    pub fn payment_failed(reason: impl Into<String>) -> Self {
        SessionError::PaymentFailed(reason.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::NotAuthorized(_) => ErrorCode::Forbidden,
            SessionError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            SessionError::SlotConflict(_) => ErrorCode::SlotConflict,
            SessionError::SlotNotOffered(_) => ErrorCode::SlotNotOffered,
            SessionError::TherapistNotFound(_) => ErrorCode::TherapistNotFound,
            SessionError::InvalidSessionType(_) => ErrorCode::InvalidSessionType,
            SessionError::InvalidRating(_) => ErrorCode::InvalidRating,
            SessionError::PaymentFailed(_) => ErrorCode::PaymentFailed,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::NotAuthorized(reason) => format!("Not authorized: {}", reason),
            SessionError::InvalidTransition { from, to } => {
                format!("Cannot move session from {} to {}", from, to)
            }
            SessionError::SlotConflict(slot) => {
                format!("Slot {} is no longer available", slot)
            }
            SessionError::SlotNotOffered(slot) => {
                format!("Therapist does not offer slot {}", slot)
            }
            SessionError::TherapistNotFound(id) => format!("Therapist not found: {}", id),
            SessionError::InvalidSessionType(kind) => {
                format!("Therapist does not offer {} sessions", kind)
            }
            SessionError::InvalidRating(value) => {
                format!("Rating must be between 1 and 5, got {}", value)
            }
            SessionError::PaymentFailed(reason) => format!("Payment failed: {}", reason),
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::validation(err.field().to_string(), err.to_string())
    }
}

/// Port errors carry only a code and message; the richer variants are
/// rebuilt from the details the adapters attach.
impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.details.get(key).cloned().unwrap_or_default();
        match err.code {
            ErrorCode::SessionNotFound => detail("session_id")
                .parse()
                .map(SessionError::NotFound)
                .unwrap_or_else(|_| SessionError::Infrastructure(err.to_string())),
            ErrorCode::SlotConflict => Slot::parse(&detail("date"), &detail("time"))
                .map(SessionError::SlotConflict)
                .unwrap_or_else(|_| SessionError::Infrastructure(err.to_string())),
            ErrorCode::InvalidStateTransition => {
                match (detail("from").parse(), detail("to").parse()) {
                    (Ok(from), Ok(to)) => SessionError::InvalidTransition { from, to },
                    _ => SessionError::Infrastructure(err.to_string()),
                }
            }
            ErrorCode::Forbidden | ErrorCode::Unauthorized => {
                SessionError::NotAuthorized(err.message)
            }
            ErrorCode::PaymentFailed => SessionError::PaymentFailed(err.message),
            ErrorCode::ValidationFailed => SessionError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}
