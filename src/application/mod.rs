//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate sessions through the write-side repository; query
//! handlers read through the reader ports.

pub mod handlers;

pub use handlers::*;
