//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSessionRepository` - slot-exclusive inserts and status CAS
//! - `PostgresSessionReader` - scoped, paginated session queries
//! - `PostgresFeedbackReader` - feedback lookups
//! - `PostgresTherapistDirectory` - therapist profiles

mod feedback_reader;
mod rows;
mod session_reader;
mod session_repository;
mod therapist_directory;

pub use feedback_reader::PostgresFeedbackReader;
pub use session_reader::PostgresSessionReader;
pub use session_repository::PostgresSessionRepository;
pub use therapist_directory::PostgresTherapistDirectory;
