//! Therapy Booking - session booking backend for a therapy marketplace.
//!
//! Clients book a therapist's time slot, therapists confirm, either side
//! (or an admin) cancels, and the client completes the session by leaving
//! feedback. A slot holds at most one active session, and every status
//! change is a compare-and-swap against the stored state.
//!
//! Layout follows ports and adapters: `domain` holds the rules, `ports`
//! the interfaces, `application` one handler per operation, `adapters`
//! the PostgreSQL, in-memory and HTTP implementations.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
