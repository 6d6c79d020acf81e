//! ListSessionsHandler - Query handler for the caller's sessions.

use std::sync::Arc;

use crate::domain::foundation::{Actor, Role};
use crate::domain::session::{SessionError, SessionStatus};
use crate::ports::{ListOptions, SessionList, SessionReader, SessionScope};

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// Query to list the caller's sessions.
#[derive(Debug, Clone, Default)]
pub struct ListSessionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<SessionStatus>,
}

impl ListSessionsQuery {
    pub fn paginated(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            status: None,
        }
    }

    fn to_list_options(&self) -> ListOptions {
        let per_page = self
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        let mut options = ListOptions::paginated(self.page.unwrap_or(1), per_page);

        if let Some(status) = self.status {
            options = options.with_status(status);
        }

        options
    }
}

/// Clients see what they booked, therapists what was booked with them,
/// admins everything.
pub fn scope_for(actor: &Actor) -> SessionScope {
    match actor.role {
        Role::Client => SessionScope::Client(actor.user_id.clone()),
        Role::Therapist => SessionScope::Therapist(actor.user_id.clone()),
        Role::Admin => SessionScope::All,
    }
}

pub struct ListSessionsHandler {
    reader: Arc<dyn SessionReader>,
}

impl ListSessionsHandler {
    pub fn new(reader: Arc<dyn SessionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ListSessionsQuery,
        actor: &Actor,
    ) -> Result<SessionList, SessionError> {
        let options = query.to_list_options();
        let list = self.reader.list(&scope_for(actor), &options).await?;
        Ok(list)
    }
}
