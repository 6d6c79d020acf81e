//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, identity types, errors and the event
//! plumbing that form the vocabulary of the booking domain.

mod auth;
mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{Actor, AuthError, AuthenticatedUser, Role};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{FeedbackId, NotificationId, SessionId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
