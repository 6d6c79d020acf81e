//! SessionNotificationHandler - Notifies both parties of lifecycle changes.
//!
//! Subscribes to the four session event types. Each event yields one
//! notification for the client and one for the therapist. A failed dispatch
//! is logged and does not stop the other.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::session::{
    SessionBooked, SessionCancelled, SessionCompleted, SessionConfirmed, SESSION_BOOKED,
    SESSION_CANCELLED, SESSION_COMPLETED, SESSION_CONFIRMED,
};
use crate::ports::{EventHandler, NotificationDispatcher};

pub struct SessionNotificationHandler {
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl SessionNotificationHandler {
    pub fn new(dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self { dispatcher }
    }

    fn payload<T: serde::de::DeserializeOwned>(event: &EventEnvelope) -> Result<T, DomainError> {
        event.payload_as().map_err(|e| {
            DomainError::new(ErrorCode::ValidationFailed, e.to_string())
                .with_detail("event_type", event.event_type.clone())
        })
    }

    /// Builds the notifications an event produces; empty for unrelated events.
    pub fn notifications_for(event: &EventEnvelope) -> Result<Vec<Notification>, DomainError> {
        let notifications = match event.event_type.as_str() {
            SESSION_BOOKED => {
                let e: SessionBooked = Self::payload(event)?;
                vec![
                    Notification::new(
                        e.client_id,
                        NotificationKind::Success,
                        "Session booked",
                        format!(
                            "Your {} session with {} on {} is awaiting confirmation.",
                            e.session_type, e.therapist_name, e.slot
                        ),
                    )
                    .for_session(e.session_id),
                    Notification::new(
                        e.therapist_id,
                        NotificationKind::Info,
                        "New session request",
                        format!("A client requested a {} session on {}.", e.session_type, e.slot),
                    )
                    .for_session(e.session_id),
                ]
            }
            SESSION_CONFIRMED => {
                let e: SessionConfirmed = Self::payload(event)?;
                let client_message = match &e.meet_link {
                    Some(link) => format!(
                        "{} confirmed your session on {}. Join at {}",
                        e.therapist_name, e.slot, link
                    ),
                    None => format!("{} confirmed your session on {}.", e.therapist_name, e.slot),
                };
                vec![
                    Notification::new(e.client_id, NotificationKind::Success, "Session confirmed", client_message)
                        .for_session(e.session_id),
                    Notification::new(
                        e.therapist_id,
                        NotificationKind::Info,
                        "Session confirmed",
                        format!("You confirmed the session on {}.", e.slot),
                    )
                    .for_session(e.session_id),
                ]
            }
            SESSION_CANCELLED => {
                let e: SessionCancelled = Self::payload(event)?;
                let mut message = format!("The session on {} was cancelled by the {}.", e.slot, e.cancelled_by_role);
                if e.late {
                    message.push_str(" This was a late cancellation.");
                }
                vec![
                    Notification::new(e.client_id, NotificationKind::Warning, "Session cancelled", message.clone())
                        .for_session(e.session_id),
                    Notification::new(e.therapist_id, NotificationKind::Warning, "Session cancelled", message)
                        .for_session(e.session_id),
                ]
            }
            SESSION_COMPLETED => {
                let e: SessionCompleted = Self::payload(event)?;
                vec![
                    Notification::new(
                        e.client_id,
                        NotificationKind::Success,
                        "Feedback received",
                        format!("Thanks for rating your session with {}.", e.therapist_name),
                    )
                    .for_session(e.session_id),
                    Notification::new(
                        e.therapist_id,
                        NotificationKind::Info,
                        "New feedback",
                        format!("Your session on {} was rated {}/5.", e.slot, e.rating),
                    )
                    .for_session(e.session_id),
                ]
            }
            _ => Vec::new(),
        };
        Ok(notifications)
    }
}

#[async_trait]
impl EventHandler for SessionNotificationHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        for notification in Self::notifications_for(&event)? {
            let recipient = notification.recipient.clone();
            if let Err(err) = self.dispatcher.dispatch(notification).await {
                tracing::warn!(
                    event_type = %event.event_type,
                    session_id = %event.aggregate_id,
                    recipient = %recipient,
                    error = %err,
                    "notification dispatch failed"
                );
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "SessionNotificationHandler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Actor, Role, SessionId, Timestamp, UserId};
    use crate::domain::session::{NewSession, Price, Session, SessionStatus, SessionType, Slot};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingDispatcher {
        sent: Mutex<Vec<Notification>>,
        fail_for: Option<UserId>,
    }

    #[async_trait]
    impl NotificationDispatcher for RecordingDispatcher {
        async fn dispatch(&self, notification: Notification) -> Result<(), DomainError> {
            if self.fail_for.as_ref() == Some(&notification.recipient) {
                return Err(DomainError::new(ErrorCode::InternalError, "mailbox full"));
            }
            self.sent.lock().unwrap().push(notification);
            Ok(())
        }
    }

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn session(session_type: SessionType) -> Session {
        Session::book(
            SessionId::new(),
            NewSession {
                client_id: uid("client-1"),
                therapist_id: uid("therapist-1"),
                therapist_name: "Dr. Rivera".to_string(),
                slot: Slot::parse("2025-01-15", "10:00").unwrap(),
                session_type,
                price: Price::from_cents(2500).unwrap(),
                payment_transaction_id: None,
            },
        )
    }

    fn envelope<E: crate::domain::foundation::DomainEvent + serde::Serialize>(e: &E) -> EventEnvelope {
        EventEnvelope::from_event(e).unwrap()
    }

    #[tokio::test]
    async fn booking_notifies_client_and_therapist() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handler = SessionNotificationHandler::new(dispatcher.clone());

        let event = SessionBooked::from_session(&session(SessionType::Online));
        handler.handle(envelope(&event)).await.unwrap();

        let sent = dispatcher.sent.lock().unwrap();
        let recipients: Vec<&str> = sent.iter().map(|n| n.recipient.as_str()).collect();
        assert_eq!(recipients, vec!["client-1", "therapist-1"]);
        assert!(sent.iter().all(|n| n.session_id == Some(event.session_id)));
    }

    #[tokio::test]
    async fn confirmation_carries_meeting_link_to_client() {
        let mut s = session(SessionType::Online);
        s.confirm(&Actor::new(uid("therapist-1"), Role::Therapist), Some("https://meet.test/x".into()))
            .unwrap();
        let notes = SessionNotificationHandler::notifications_for(&envelope(&SessionConfirmed::from_session(&s)))
            .unwrap();
        assert!(notes[0].message.contains("https://meet.test/x"));
    }

    #[tokio::test]
    async fn late_cancellation_is_mentioned() {
        let s = session(SessionType::Online);
        let event = SessionCancelled {
            event_id: crate::domain::foundation::EventId::new(),
            session_id: *s.id(),
            client_id: s.client_id().clone(),
            therapist_id: s.therapist_id().clone(),
            therapist_name: s.therapist_name().to_string(),
            slot: *s.slot(),
            cancelled_by: uid("client-1"),
            cancelled_by_role: Role::Client,
            previous_status: SessionStatus::Pending,
            late: true,
            cancelled_at: Timestamp::now(),
        };
        let notes = SessionNotificationHandler::notifications_for(&envelope(&event)).unwrap();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| n.kind == NotificationKind::Warning));
        assert!(notes[0].message.contains("late cancellation"));
    }

    #[tokio::test]
    async fn one_failed_dispatch_does_not_block_the_other() {
        let dispatcher = Arc::new(RecordingDispatcher {
            fail_for: Some(uid("client-1")),
            ..Default::default()
        });
        let handler = SessionNotificationHandler::new(dispatcher.clone());

        let event = SessionBooked::from_session(&session(SessionType::InPerson));
        assert!(handler.handle(envelope(&event)).await.is_ok());

        let sent = dispatcher.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient.as_str(), "therapist-1");
    }

    #[tokio::test]
    async fn unrelated_events_are_ignored() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let handler = SessionNotificationHandler::new(dispatcher.clone());
        handler.handle(EventEnvelope::test_fixture()).await.unwrap();
        assert!(dispatcher.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_payload_is_an_error() {
        let handler = SessionNotificationHandler::new(Arc::new(RecordingDispatcher::default()));
        let mut bad = EventEnvelope::test_fixture();
        bad.event_type = SESSION_COMPLETED.to_string();
        assert!(handler.handle(bad).await.is_err());
    }
}
