//! Meeting links derived from a base URL.
//!
//! Each confirmation gets a fresh random room under the base URL, so a
//! cancelled and rebooked slot never reuses a link.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::session::Session;
use crate::ports::MeetingLinkProvider;

#[derive(Debug, Clone)]
pub struct StaticMeetingLinkProvider {
    base_url: String,
}

impl StaticMeetingLinkProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn room_name() -> String {
        let raw = uuid::Uuid::new_v4().simple().to_string();
        // xxx-xxxx-xxx, the shape video services commonly use
        format!("{}-{}-{}", &raw[0..3], &raw[3..7], &raw[7..10])
    }
}

#[async_trait]
impl MeetingLinkProvider for StaticMeetingLinkProvider {
    async fn create_link(&self, session: &Session) -> Result<String, DomainError> {
        if self.base_url.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "meeting link base URL is not configured",
            ));
        }
        let link = format!("{}/{}", self.base_url, Self::room_name());
        tracing::debug!(session_id = %session.id(), link = %link, "meeting link issued");
        Ok(link)
    }
}
