//! UTC points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable point in time, always UTC. Serializes as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Negative values move backwards. Clamps at the representable range.
    pub fn add_hours(&self, hours: i64) -> Self {
        self.saturating_add(Duration::try_hours(hours), hours < 0)
    }

    pub fn add_days(&self, days: i64) -> Self {
        self.saturating_add(Duration::try_days(days), days < 0)
    }

    fn saturating_add(&self, delta: Option<Duration>, backwards: bool) -> Self {
        match delta.and_then(|delta| self.0.checked_add_signed(delta)) {
            Some(dt) => Self(dt),
            None if backwards => Self(DateTime::<Utc>::MIN_UTC),
            None => Self(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Seconds since the Unix epoch, as used in JWT claims.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}
