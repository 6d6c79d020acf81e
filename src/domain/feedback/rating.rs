//! Star rating left by a client on a completed session (1 to 5).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
#[repr(u8)]
pub enum Rating {
    Poor = 1,
    Fair = 2,
    Good = 3,
    VeryGood = 4,
    Excellent = 5,
}

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    /// Creates a Rating from an integer, returning error if outside 1..=5.
    pub fn try_from_value(value: i64) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(Rating::Poor),
            2 => Ok(Rating::Fair),
            3 => Ok(Rating::Good),
            4 => Ok(Rating::VeryGood),
            5 => Ok(Rating::Excellent),
            _ => Err(ValidationError::out_of_range(
                "rating",
                Self::MIN,
                Self::MAX,
                value,
            )),
        }
    }

    /// Number of stars.
    pub fn stars(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Poor => "Poor",
            Rating::Fair => "Fair",
            Rating::Good => "Good",
            Rating::VeryGood => "Very Good",
            Rating::Excellent => "Excellent",
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::try_from_value(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.stars() as i64
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.stars())
    }
}
