//! GetSessionOverviewHandler - Dashboard statistics for admins and therapists.

use std::sync::Arc;

use crate::domain::foundation::{Actor, Role, SessionId, UserId};
use crate::domain::overview::{OverviewScope, SessionOverview};
use crate::domain::session::SessionError;
use crate::ports::{FeedbackReader, SessionReader, SessionScope};

#[derive(Debug, Clone, Default)]
pub struct GetSessionOverviewQuery {
    /// Admins may narrow the overview to one therapist.
    pub therapist_id: Option<UserId>,
}

pub struct GetSessionOverviewHandler {
    reader: Arc<dyn SessionReader>,
    feedback: Arc<dyn FeedbackReader>,
}

impl GetSessionOverviewHandler {
    pub fn new(reader: Arc<dyn SessionReader>, feedback: Arc<dyn FeedbackReader>) -> Self {
        Self { reader, feedback }
    }

    /// Resolves which sessions the actor may aggregate over.
    pub fn resolve_scope(
        query: &GetSessionOverviewQuery,
        actor: &Actor,
    ) -> Result<OverviewScope, SessionError> {
        match actor.role {
            Role::Admin => Ok(match &query.therapist_id {
                Some(id) => OverviewScope::Therapist(id.clone()),
                None => OverviewScope::Platform,
            }),
            // A therapist's own figures, whatever was asked for
            Role::Therapist => Ok(OverviewScope::Therapist(actor.user_id.clone())),
            Role::Client => Err(SessionError::not_authorized(
                "only therapists and admins may view the overview",
            )),
        }
    }

    pub async fn handle(
        &self,
        query: GetSessionOverviewQuery,
        actor: &Actor,
    ) -> Result<SessionOverview, SessionError> {
        let scope = match Self::resolve_scope(&query, actor)? {
            OverviewScope::Platform => SessionScope::All,
            OverviewScope::Therapist(id) => SessionScope::Therapist(id),
        };

        let sessions = self.reader.all_in_scope(&scope).await?;
        let ids: Vec<SessionId> = sessions.iter().map(|s| *s.id()).collect();
        let feedback = self.feedback.find_for_sessions(&ids).await?;

        tracing::debug!(
            actor_id = %actor.user_id,
            sessions = sessions.len(),
            "computing session overview"
        );

        Ok(SessionOverview::compute(&sessions, &feedback))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::feedback::Rating;
    use crate::domain::session::{NewSession, Price, Session, SessionType, Slot};

    fn completed_with(therapist_id: &str, stars: Rating) -> (Session, crate::domain::feedback::Feedback) {
        let mut session = Session::book(
            SessionId::new(),
            NewSession {
                client_id: uid("client-1"),
                therapist_id: uid(therapist_id),
                therapist_name: "Dr. X".to_string(),
                slot: Slot::parse("2025-03-01", "09:00").unwrap(),
                session_type: SessionType::InPerson,
                price: Price::from_cents(3000).unwrap(),
                payment_transaction_id: None,
            },
        );
        let therapist = crate::domain::foundation::Actor::new(uid(therapist_id), Role::Therapist);
        session.confirm(&therapist, None).unwrap();
        let (_, feedback) = session.complete(&client(), stars, None).unwrap();
        (session, feedback)
    }

    fn store() -> Arc<MockSessionStore> {
        let store = MockSessionStore::new();
        let (a, fa) = completed_with("therapist-1", Rating::Excellent);
        let (b, fb) = completed_with("therapist-2", Rating::Fair);
        store.sessions.lock().unwrap().extend([a, b, pending_session(SessionType::Online)]);
        store.feedback.lock().unwrap().extend([fa, fb]);
        Arc::new(store)
    }

    #[tokio::test]
    async fn admin_gets_platform_figures() {
        let store = store();
        let handler = GetSessionOverviewHandler::new(store.clone(), store);

        let overview = handler
            .handle(GetSessionOverviewQuery::default(), &admin())
            .await
            .unwrap();

        assert_eq!(overview.total_sessions, 3);
        assert_eq!(overview.by_status.completed, 2);
        assert_eq!(overview.by_status.pending, 1);
        assert_eq!(overview.total_earnings.cents(), 6000);
        assert_eq!(overview.feedback_count, 2);
        assert_eq!(overview.average_rating, Some(3.5));
    }

    #[tokio::test]
    async fn therapist_gets_own_figures_only() {
        let store = store();
        let handler = GetSessionOverviewHandler::new(store.clone(), store);

        let query = GetSessionOverviewQuery {
            therapist_id: Some(uid("therapist-2")),
        };
        let overview = handler.handle(query, &therapist()).await.unwrap();

        assert_eq!(overview.total_sessions, 2);
        assert_eq!(overview.feedback_count, 1);
        assert_eq!(overview.average_rating, Some(5.0));
    }

    #[tokio::test]
    async fn admin_can_narrow_to_a_therapist() {
        let store = store();
        let handler = GetSessionOverviewHandler::new(store.clone(), store);

        let query = GetSessionOverviewQuery {
            therapist_id: Some(uid("therapist-2")),
        };
        let overview = handler.handle(query, &admin()).await.unwrap();
        assert_eq!(overview.total_sessions, 1);
        assert_eq!(overview.average_rating, Some(2.0));
    }

    #[tokio::test]
    async fn clients_are_refused() {
        let store = store();
        let handler = GetSessionOverviewHandler::new(store.clone(), store);
        let err = handler
            .handle(GetSessionOverviewQuery::default(), &client())
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::NotAuthorized(_)));
    }
}
