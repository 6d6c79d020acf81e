//! Meeting link port.

use crate::domain::foundation::DomainError;
use crate::domain::session::Session;
use async_trait::async_trait;

/// Issues video-call links for online sessions on confirmation.
#[async_trait]
pub trait MeetingLinkProvider: Send + Sync {
    async fn create_link(&self, session: &Session) -> Result<String, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeting_link_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn MeetingLinkProvider) {}
    }
}
