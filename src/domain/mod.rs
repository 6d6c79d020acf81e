//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, identity, errors, events)
//! - `session` - Session aggregate, lifecycle rules and events
//! - `feedback` - Ratings recorded on completion
//! - `therapist` - Directory view of a therapist
//! - `overview` - Dashboard statistics
//! - `notification` - User-facing notifications

pub mod feedback;
pub mod foundation;
pub mod notification;
pub mod overview;
pub mod session;
pub mod therapist;
