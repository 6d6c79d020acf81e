//! Session price in minor currency units.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Amount charged for one session, in minor units (cents).
///
/// Snapshotted from the therapist's rate when the session is booked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Price(i64);

impl Price {
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if cents < 0 {
            return Err(ValidationError::out_of_range("price", 0, i64::MAX, cents));
        }
        Ok(Self(cents))
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn saturating_add(self, other: Price) -> Price {
        Price(self.0.saturating_add(other.0))
    }

    /// `None` when `other` is larger.
    pub fn checked_sub(self, other: Price) -> Option<Price> {
        self.0.checked_sub(other.0).filter(|v| *v >= 0).map(Price)
    }
}

impl TryFrom<i64> for Price {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Price::from_cents(value)
    }
}

impl From<Price> for i64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_amounts() {
        assert!(Price::from_cents(-1).is_err());
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }

    #[test]
    fn displays_major_and_minor_units() {
        assert_eq!(Price::from_cents(2500).unwrap().to_string(), "25.00");
        assert_eq!(Price::from_cents(1999).unwrap().to_string(), "19.99");
    }

    #[test]
    fn sums_saturate() {
        let big = Price::from_cents(i64::MAX).unwrap();
        assert_eq!(big.saturating_add(Price::from_cents(1).unwrap()), big);
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let price = Price::from_cents(2500).unwrap();
        assert_eq!(price.checked_sub(Price::from_cents(500).unwrap()), Price::from_cents(2000).ok());
        assert_eq!(price.checked_sub(price), Some(Price::zero()));
        assert_eq!(price.checked_sub(Price::from_cents(2501).unwrap()), None);
    }

    #[test]
    fn serializes_as_plain_integer() {
        assert_eq!(serde_json::to_string(&Price::from_cents(2500).unwrap()).unwrap(), "2500");
    }
}
