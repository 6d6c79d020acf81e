//! Booking rules and in-memory mode settings

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Base for generated meeting links
    #[serde(default = "default_meeting_base_url")]
    pub meeting_base_url: String,

    /// Cancelling within this many hours of the start is flagged late
    #[serde(default = "default_late_cancellation_hours")]
    pub late_cancellation_hours: i64,

    /// JSON seed for the in-memory therapist directory
    #[serde(default)]
    pub therapists_file: Option<String>,

    /// Notifications kept per user
    #[serde(default = "default_notification_capacity")]
    pub notification_capacity: usize,

    /// Events kept by the in-memory bus for inspection
    #[serde(default = "default_event_history")]
    pub event_history: usize,
}

impl BookingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.meeting_base_url.starts_with("https://")
            && !self.meeting_base_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidMeetingUrl);
        }
        if !(0..=168).contains(&self.late_cancellation_hours) {
            return Err(ValidationError::InvalidLateWindow);
        }
        if self.notification_capacity == 0 {
            return Err(ValidationError::InvalidNotificationCapacity);
        }
        Ok(())
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            meeting_base_url: default_meeting_base_url(),
            late_cancellation_hours: default_late_cancellation_hours(),
            therapists_file: None,
            notification_capacity: default_notification_capacity(),
            event_history: default_event_history(),
        }
    }
}

fn default_meeting_base_url() -> String {
    "https://meet.google.com".to_string()
}

fn default_late_cancellation_hours() -> i64 {
    24
}

fn default_notification_capacity() -> usize {
    100
}

fn default_event_history() -> usize {
    1000
}
