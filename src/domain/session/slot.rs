//! Bookable appointment slot (calendar date + time of day).

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, ValidationError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const ACCEPTED_TIME_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];
/// Four-digit years only.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Date and time a session is scheduled for.
///
/// Equality is on the parsed values, so "10:00" and "10:00:00" name the same
/// slot. Together with a therapist id this is the exclusivity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SlotParts", into = "SlotParts")]
pub struct Slot {
    date: NaiveDate,
    time: NaiveTime,
}

#[derive(Serialize, Deserialize)]
struct SlotParts {
    date: String,
    time: String,
}

impl Slot {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Parses a slot from separate date ("2025-01-15") and time ("10:00") strings.
    pub fn parse(date: &str, time: &str) -> Result<Self, ValidationError> {
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
            ValidationError::invalid_format("date", format!("expected YYYY-MM-DD, got '{}'", date))
        })?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            return Err(ValidationError::out_of_range(
                "date",
                MIN_YEAR.into(),
                MAX_YEAR.into(),
                date.year().into(),
            ));
        }
        let time = ACCEPTED_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(time.trim(), fmt).ok())
            .ok_or_else(|| {
                ValidationError::invalid_format("time", format!("expected HH:MM, got '{}'", time))
            })?;
        Ok(Self { date, time })
    }

    /// Parses a combined "2025-01-15 10:00" availability entry.
    pub fn parse_combined(value: &str) -> Result<Self, ValidationError> {
        let (date, time) = value.trim().split_once(' ').ok_or_else(|| {
            ValidationError::invalid_format("slot", format!("expected 'YYYY-MM-DD HH:MM', got '{}'", value))
        })?;
        Self::parse(date, time)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn time_string(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }

    /// Scheduled start, interpreted in UTC.
    pub fn starts_at(&self) -> Timestamp {
        Timestamp::from_datetime(self.date.and_time(self.time).and_utc())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date_string(), self.time_string())
    }
}

impl TryFrom<SlotParts> for Slot {
    type Error = ValidationError;

    fn try_from(parts: SlotParts) -> Result<Self, Self::Error> {
        Slot::parse(&parts.date, &parts.time)
    }
}

impl From<Slot> for SlotParts {
    fn from(slot: Slot) -> Self {
        SlotParts {
            date: slot.date_string(),
            time: slot.time_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_seconds_and_meridiem() {
        let a = Slot::parse("2025-01-15", "10:00").unwrap();
        let b = Slot::parse("2025-01-15", "10:00:00").unwrap();
        let c = Slot::parse("2025-01-15", "10:00 AM").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.to_string(), "2025-01-15 10:00");
    }

    #[test]
    fn afternoon_meridiem_is_distinct() {
        let morning = Slot::parse("2025-01-15", "02:00 AM").unwrap();
        let afternoon = Slot::parse("2025-01-15", "02:00 PM").unwrap();
        assert_ne!(morning, afternoon);
        assert_eq!(afternoon.time_string(), "14:00");
    }

    #[test]
    fn parse_rejects_bad_date() {
        let err = Slot::parse("15/01/2025", "10:00").unwrap_err();
        assert_eq!(err.field(), "date");
        assert!(Slot::parse("2025-02-30", "10:00").is_err());
    }

    #[test]
    fn parse_rejects_years_outside_four_digits() {
        for date in ["-262143-01-01", "+262142-12-31", "0000-01-01", "10000-01-01"] {
            let err = Slot::parse(date, "10:00").unwrap_err();
            assert_eq!(err.field(), "date", "{}", date);
        }
        assert!(Slot::parse("0001-01-01", "00:00").is_ok());
        assert!(Slot::parse("9999-12-31", "23:59").is_ok());
    }

    #[test]
    fn deserializing_an_extreme_year_fails() {
        let json = serde_json::json!({"date": "-262143-01-01", "time": "10:00"});
        assert!(serde_json::from_value::<Slot>(json).is_err());
    }

    #[test]
    fn parse_rejects_bad_time() {
        let err = Slot::parse("2025-01-15", "25:00").unwrap_err();
        assert_eq!(err.field(), "time");
    }

    #[test]
    fn parse_combined_splits_on_space() {
        let slot = Slot::parse_combined("2025-01-15 14:30").unwrap();
        assert_eq!(slot.date_string(), "2025-01-15");
        assert_eq!(slot.time_string(), "14:30");
        assert!(Slot::parse_combined("2025-01-15T14:30").is_err());
    }

    #[test]
    fn serde_uses_string_parts() {
        let slot = Slot::parse("2025-01-15", "10:00").unwrap();
        let json = serde_json::to_value(slot).unwrap();
        assert_eq!(json, serde_json::json!({"date": "2025-01-15", "time": "10:00"}));
        let back: Slot = serde_json::from_value(json).unwrap();
        assert_eq!(back, slot);
    }

    #[test]
    fn starts_at_is_utc_instant() {
        let slot = Slot::parse("1970-01-02", "00:00").unwrap();
        assert_eq!(slot.starts_at().as_unix_secs(), 86_400);
    }
}
