//! Aggregated booking statistics for admin and therapist dashboards.

mod stats;

pub use stats::{OverviewScope, SessionOverview, StatusCounts};
