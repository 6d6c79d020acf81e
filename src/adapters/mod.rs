//! Adapters - Implementations of port interfaces.
//!
//! - `postgres` - PostgreSQL persistence (sqlx)
//! - `memory` - in-memory stores with the same guarantees, for tests and local runs
//! - `auth` - JWT and mock token validators
//! - `payment` - mock payment gateway
//! - `meeting` - meeting link generator
//! - `events` - in-memory event bus
//! - `notifications` - per-user notification center
//! - `http` - axum REST API

pub mod auth;
pub mod events;
pub mod http;
pub mod meeting;
pub mod memory;
pub mod notifications;
pub mod payment;
pub mod postgres;

pub use auth::{JwtTokenValidator, MockTokenValidator, TokenClaims};
pub use events::InMemoryEventBus;
pub use meeting::StaticMeetingLinkProvider;
pub use memory::{InMemorySessionStore, InMemoryTherapistDirectory};
pub use notifications::NotificationCenter;
pub use payment::MockPaymentGateway;
