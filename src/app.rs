//! Composition root shared by the binary and the integration tests.
//!
//! Wires port implementations into the application handlers, subscribes
//! the notifier to the lifecycle events and produces the HTTP state.

use std::sync::Arc;

use crate::adapters::http::{AppState, SessionHandlers};
use crate::adapters::{InMemoryEventBus, InMemorySessionStore, NotificationCenter};
use crate::application::handlers::notification::SessionNotificationHandler;
use crate::application::handlers::session::{
    BookSessionHandler, CancelSessionHandler, CompleteSessionHandler, ConfirmSessionHandler,
    GetSessionFeedbackHandler, GetSessionHandler, GetSessionOverviewHandler, ListSessionsHandler,
};
use crate::domain::session::SESSION_EVENT_TYPES;
use crate::ports::{
    EventSubscriber, FeedbackReader, MeetingLinkProvider, PaymentGateway, SessionReader,
    SessionRepository, TherapistDirectory, TokenValidator,
};

/// Port implementations chosen by the caller.
#[derive(Clone)]
pub struct Infrastructure {
    pub repository: Arc<dyn SessionRepository>,
    pub reader: Arc<dyn SessionReader>,
    pub feedback: Arc<dyn FeedbackReader>,
    pub directory: Arc<dyn TherapistDirectory>,
    pub payments: Arc<dyn PaymentGateway>,
    pub links: Arc<dyn MeetingLinkProvider>,
    pub tokens: Arc<dyn TokenValidator>,
}

impl Infrastructure {
    /// One in-memory store serves all three persistence ports.
    pub fn in_memory(
        store: InMemorySessionStore,
        directory: Arc<dyn TherapistDirectory>,
        payments: Arc<dyn PaymentGateway>,
        links: Arc<dyn MeetingLinkProvider>,
        tokens: Arc<dyn TokenValidator>,
    ) -> Self {
        let store = Arc::new(store);
        Self {
            repository: store.clone(),
            reader: store.clone(),
            feedback: store,
            directory,
            payments,
            links,
            tokens,
        }
    }
}

/// Settings the handlers take from configuration.
#[derive(Debug, Clone)]
pub struct BookingRules {
    pub currency: String,
    pub late_cancellation_hours: i64,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            late_cancellation_hours: 24,
        }
    }
}

/// The assembled application.
pub struct App {
    pub state: AppState,
    pub events: Arc<InMemoryEventBus>,
    pub notifications: Arc<NotificationCenter>,
}

impl App {
    pub fn assemble(
        infra: Infrastructure,
        rules: &BookingRules,
        events: Arc<InMemoryEventBus>,
        notifications: Arc<NotificationCenter>,
    ) -> Self {
        let notifier = Arc::new(SessionNotificationHandler::new(notifications.clone()));
        events.subscribe_all(&SESSION_EVENT_TYPES, notifier);

        let sessions = SessionHandlers {
            book: Arc::new(BookSessionHandler::new(
                infra.repository.clone(),
                infra.directory.clone(),
                infra.payments.clone(),
                events.clone(),
                rules.currency.clone(),
            )),
            confirm: Arc::new(ConfirmSessionHandler::new(
                infra.repository.clone(),
                infra.links.clone(),
                events.clone(),
            )),
            cancel: Arc::new(CancelSessionHandler::new(
                infra.repository.clone(),
                events.clone(),
                rules.late_cancellation_hours,
            )),
            complete: Arc::new(CompleteSessionHandler::new(
                infra.repository.clone(),
                events.clone(),
            )),
            get: Arc::new(GetSessionHandler::new(infra.repository.clone())),
            list: Arc::new(ListSessionsHandler::new(infra.reader.clone())),
            feedback: Arc::new(GetSessionFeedbackHandler::new(
                infra.repository.clone(),
                infra.feedback.clone(),
            )),
            overview: Arc::new(GetSessionOverviewHandler::new(infra.reader, infra.feedback)),
        };

        tracing::debug!(event_types = ?SESSION_EVENT_TYPES, "session notifier subscribed");

        Self {
            state: AppState {
                sessions,
                inbox: notifications.clone(),
                auth: infra.tokens,
            },
            events,
            notifications,
        }
    }
}
