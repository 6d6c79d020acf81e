//! Hand-written port doubles shared by the session handler tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{
    Actor, CommandMetadata, DomainError, ErrorCode, EventEnvelope, Role, SessionId, UserId,
};
use crate::domain::session::{
    NewSession, Price, Session, SessionStatus, SessionType, Slot,
};
use crate::domain::therapist::TherapistProfile;
use crate::ports::{
    AuthorizePaymentRequest, EventPublisher, FeedbackReader, ListOptions, MeetingLinkProvider,
    PaymentAuthorization, PaymentError, PaymentGateway, PaymentRefund, RefundPaymentRequest,
    SessionList, SessionReader, SessionRepository, SessionScope, TherapistDirectory,
};

pub fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

pub fn client() -> Actor {
    Actor::new(uid("client-1"), Role::Client)
}

pub fn other_client() -> Actor {
    Actor::new(uid("client-2"), Role::Client)
}

pub fn therapist() -> Actor {
    Actor::new(uid("therapist-1"), Role::Therapist)
}

pub fn admin() -> Actor {
    Actor::new(uid("admin-1"), Role::Admin)
}

pub fn meta(actor: Actor) -> CommandMetadata {
    CommandMetadata::new(actor).with_correlation_id("test-correlation")
}

pub fn slot() -> Slot {
    Slot::parse("2025-01-15", "10:00").unwrap()
}

pub fn pending_session(session_type: SessionType) -> Session {
    Session::book(
        SessionId::new(),
        NewSession {
            client_id: uid("client-1"),
            therapist_id: uid("therapist-1"),
            therapist_name: "Dr. Rivera".to_string(),
            slot: slot(),
            session_type,
            price: Price::from_cents(2500).unwrap(),
            payment_transaction_id: Some("txn_test".to_string()),
        },
    )
}

pub fn confirmed_session() -> Session {
    let mut session = pending_session(SessionType::Online);
    session
        .confirm(&therapist(), Some("https://meet.test/abc".to_string()))
        .unwrap();
    session
}

// ─────────────────────────────────────────────────────────────────────────────
// Session store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockSessionStore {
    pub sessions: Mutex<Vec<Session>>,
    pub feedback: Mutex<Vec<Feedback>>,
    /// Makes the next write fail with this error.
    pub fail_writes: Mutex<Option<DomainError>>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::default();
        store.sessions.lock().unwrap().push(session);
        store
    }

    pub fn failing_with(self, err: DomainError) -> Self {
        *self.fail_writes.lock().unwrap() = Some(err);
        self
    }

    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    fn injected_failure(&self) -> Result<(), DomainError> {
        match self.fail_writes.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn swap(&self, session: &Session, expected: SessionStatus) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        let stored = sessions
            .iter_mut()
            .find(|s| s.id() == session.id())
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SessionNotFound, "missing")
                    .with_detail("session_id", session.id().to_string())
            })?;
        if stored.status() != expected {
            return Err(DomainError::new(ErrorCode::InvalidStateTransition, "stale")
                .with_detail("from", stored.status().as_str())
                .with_detail("to", session.status().as_str()));
        }
        *stored = session.clone();
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MockSessionStore {
    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        self.injected_failure()?;
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn update_if_status(
        &self,
        session: &Session,
        expected: SessionStatus,
    ) -> Result<(), DomainError> {
        self.injected_failure()?;
        self.swap(session, expected)
    }

    async fn complete_with_feedback(
        &self,
        session: &Session,
        feedback: &Feedback,
    ) -> Result<(), DomainError> {
        self.injected_failure()?;
        self.swap(session, SessionStatus::Confirmed)?;
        self.feedback.lock().unwrap().push(feedback.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_active_in_slot(
        &self,
        therapist_id: &UserId,
        slot: &Slot,
    ) -> Result<Option<Session>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.therapist_id() == therapist_id && s.slot() == slot && s.is_active())
            .cloned())
    }
}

#[async_trait]
impl SessionReader for MockSessionStore {
    async fn list(
        &self,
        scope: &SessionScope,
        options: &ListOptions,
    ) -> Result<SessionList, DomainError> {
        let in_scope = self.all_in_scope(scope).await?;
        Ok(options.apply(in_scope))
    }

    async fn all_in_scope(&self, scope: &SessionScope) -> Result<Vec<Session>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| scope.includes(s))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FeedbackReader for MockSessionStore {
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Feedback>, DomainError> {
        Ok(self
            .feedback
            .lock()
            .unwrap()
            .iter()
            .find(|f| &f.session_id == session_id)
            .cloned())
    }

    async fn find_for_sessions(
        &self,
        session_ids: &[SessionId],
    ) -> Result<Vec<Feedback>, DomainError> {
        Ok(self
            .feedback
            .lock()
            .unwrap()
            .iter()
            .filter(|f| session_ids.contains(&f.session_id))
            .cloned()
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Collaborators
// ─────────────────────────────────────────────────────────────────────────────

pub struct MockDirectory {
    pub therapists: Vec<TherapistProfile>,
}

impl MockDirectory {
    pub fn with(profile: TherapistProfile) -> Self {
        Self {
            therapists: vec![profile],
        }
    }
}

#[async_trait]
impl TherapistDirectory for MockDirectory {
    async fn get_therapist(&self, id: &UserId) -> Result<Option<TherapistProfile>, DomainError> {
        Ok(self.therapists.iter().find(|t| &t.id == id).cloned())
    }
}

pub fn online_only_therapist() -> TherapistProfile {
    TherapistProfile::new(uid("therapist-1"), "Dr. Rivera", Price::from_cents(2500).unwrap())
}

#[derive(Default)]
pub struct MockPayments {
    pub decline: bool,
    pub refund_fails: bool,
    pub calls: Mutex<Vec<AuthorizePaymentRequest>>,
    pub refunds: Mutex<Vec<RefundPaymentRequest>>,
}

impl MockPayments {
    pub fn approving() -> Self {
        Self::default()
    }

    pub fn declining() -> Self {
        Self {
            decline: true,
            ..Self::default()
        }
    }

    pub fn refusing_refunds() -> Self {
        Self {
            refund_fails: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn refunded(&self) -> Vec<RefundPaymentRequest> {
        self.refunds.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPayments {
    async fn authorize(
        &self,
        request: AuthorizePaymentRequest,
    ) -> Result<PaymentAuthorization, PaymentError> {
        self.calls.lock().unwrap().push(request.clone());
        if self.decline {
            return Err(PaymentError::card_declined("Card declined"));
        }
        Ok(PaymentAuthorization {
            transaction_id: format!("txn_{}", self.call_count()),
            amount: request.amount,
            currency: request.currency,
        })
    }

    async fn refund(&self, request: RefundPaymentRequest) -> Result<PaymentRefund, PaymentError> {
        if self.refund_fails {
            return Err(PaymentError::network("gateway unreachable"));
        }
        self.refunds.lock().unwrap().push(request.clone());
        Ok(PaymentRefund {
            refund_id: format!("ref_{}", self.refunds.lock().unwrap().len()),
            transaction_id: request.transaction_id,
            amount: request.amount,
        })
    }
}

pub struct FixedLinks;

#[async_trait]
impl MeetingLinkProvider for FixedLinks {
    async fn create_link(&self, session: &Session) -> Result<String, DomainError> {
        Ok(format!("https://meet.test/{}", session.id()))
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<EventEnvelope>>,
    pub fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn event_types(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(ErrorCode::InternalError, "bus down"));
        }
        self.published.lock().unwrap().push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
