//! In-process adapters for the persistence ports.
//!
//! Used by tests and by the server when no database is configured.

mod session_store;
mod therapist_directory;

pub use session_store::InMemorySessionStore;
pub use therapist_directory::InMemoryTherapistDirectory;
