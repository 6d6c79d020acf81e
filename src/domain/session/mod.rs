//! Session domain module.
//!
//! A session is one booked appointment. Its lifecycle is
//! pending → confirmed → completed, with cancellation allowed from either
//! active state. While active, a session holds its (therapist, slot) pair
//! exclusively.
//!
//! # Events
//!
//! - `SessionBooked`
//! - `SessionConfirmed`
//! - `SessionCancelled`
//! - `SessionCompleted`

mod aggregate;
mod errors;
mod events;
mod price;
mod session_type;
mod slot;
mod status;

pub use aggregate::{NewSession, Session, SessionSnapshot};
pub use errors::SessionError;
pub use events::{
    SessionBooked, SessionCancelled, SessionCompleted, SessionConfirmed, SESSION_BOOKED,
    SESSION_CANCELLED, SESSION_COMPLETED, SESSION_CONFIRMED, SESSION_EVENT_TYPES,
};
pub use price::Price;
pub use session_type::SessionType;
pub use slot::Slot;
pub use status::SessionStatus;
