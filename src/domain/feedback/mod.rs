//! Post-session feedback.
//!
//! Feedback is recorded in the same atomic step that completes a session,
//! so every completed session has exactly one record.

mod record;
mod rating;

pub use record::{Feedback, MAX_COMMENT_LENGTH};
pub use rating::Rating;
