//! Session reader port (read side / queries).

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::{Session, SessionStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Whose sessions a query returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionScope {
    /// Sessions booked by this client.
    Client(UserId),
    /// Sessions with this therapist.
    Therapist(UserId),
    /// Every session (admin).
    All,
}

impl SessionScope {
    pub fn includes(&self, session: &Session) -> bool {
        match self {
            SessionScope::Client(id) => session.client_id() == id,
            SessionScope::Therapist(id) => session.therapist_id() == id,
            SessionScope::All => true,
        }
    }
}

/// Reader port for session queries.
#[async_trait]
pub trait SessionReader: Send + Sync {
    /// List sessions in scope, newest booking first.
    async fn list(
        &self,
        scope: &SessionScope,
        options: &ListOptions,
    ) -> Result<SessionList, DomainError>;

    /// Every session in scope, unpaginated (for statistics).
    async fn all_in_scope(&self, scope: &SessionScope) -> Result<Vec<Session>, DomainError>;
}

/// Options for listing sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Filter by status (None = all statuses).
    pub status: Option<SessionStatus>,
}

impl ListOptions {
    /// Create options for a paginated query. Pages start at 1.
    pub fn paginated(page: u32, per_page: u32) -> Self {
        Self {
            limit: Some(per_page),
            offset: Some(page.saturating_sub(1).saturating_mul(per_page)),
            status: None,
        }
    }

    /// Filter to a specific status.
    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Applies status filter and window to an already ordered list.
    pub fn apply(&self, sessions: Vec<Session>) -> SessionList {
        let matching: Vec<Session> = sessions
            .into_iter()
            .filter(|s| self.status.map_or(true, |status| s.status() == status))
            .collect();
        let total = matching.len() as u64;
        let offset = self.offset.unwrap_or(0) as usize;
        let limit = self.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        let items: Vec<Session> = matching.into_iter().skip(offset).take(limit).collect();
        let has_more = (offset + items.len()) < total as usize;
        SessionList {
            items,
            total,
            has_more,
        }
    }
}

/// Paginated list of sessions.
#[derive(Debug, Clone)]
pub struct SessionList {
    pub items: Vec<Session>,
    /// Total number of matching sessions.
    pub total: u64,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginated_computes_offset() {
        let opts = ListOptions::paginated(3, 20);
        assert_eq!(opts.limit, Some(20));
        assert_eq!(opts.offset, Some(40));
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        assert_eq!(ListOptions::paginated(0, 10).offset, Some(0));
    }

    #[test]
    fn session_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn SessionReader) {}
    }
}
