//! End-to-end lifecycle scenarios through the application handlers.

mod common;

use common::*;
use therapy_booking::application::handlers::session::{
    BookSessionCommand, CancelSessionCommand, CompleteSessionCommand, ConfirmSessionCommand,
    GetSessionFeedbackQuery, GetSessionOverviewQuery, ListSessionsQuery,
};
use therapy_booking::domain::feedback::Rating;
use therapy_booking::domain::foundation::{Role, SessionId};
use therapy_booking::domain::session::{
    SessionError, SessionStatus, SessionType, Slot, SESSION_BOOKED, SESSION_CANCELLED,
    SESSION_COMPLETED, SESSION_CONFIRMED,
};
use therapy_booking::ports::{NotificationInbox, SessionRepository};

fn book_cmd(therapist: &str, session_type: SessionType) -> BookSessionCommand {
    BookSessionCommand {
        therapist_id: uid(therapist),
        date: DATE.to_string(),
        time: TIME.to_string(),
        session_type,
    }
}

async fn book_online(h: &Harness) -> SessionId {
    let result = h
        .app
        .state
        .sessions
        .book
        .handle(book_cmd(THERAPIST, SessionType::Online), meta(CLIENT, Role::Client))
        .await
        .unwrap();
    *result.session.id()
}

async fn confirm(h: &Harness, id: SessionId) -> Result<(), SessionError> {
    h.app
        .state
        .sessions
        .confirm
        .handle(ConfirmSessionCommand { session_id: id }, meta(THERAPIST, Role::Therapist))
        .await
        .map(|_| ())
}

async fn status_of(h: &Harness, id: SessionId) -> SessionStatus {
    h.store.find_by_id(&id).await.unwrap().unwrap().status()
}

// =============================================================================
// Scenario A: booking and slot exclusivity
// =============================================================================

#[tokio::test]
async fn second_booking_of_an_active_slot_conflicts() {
    let h = Harness::new();

    let first = h
        .app
        .state
        .sessions
        .book
        .handle(book_cmd(THERAPIST, SessionType::Online), meta(CLIENT, Role::Client))
        .await
        .unwrap();
    assert_eq!(first.session.status(), SessionStatus::Pending);
    assert_eq!(first.session.price().cents(), 2500);

    let second = h
        .app
        .state
        .sessions
        .book
        .handle(book_cmd(THERAPIST, SessionType::Online), meta(OTHER_CLIENT, Role::Client))
        .await
        .unwrap_err();

    assert_eq!(
        second,
        SessionError::slot_conflict(Slot::parse(DATE, TIME).unwrap())
    );
    assert_eq!(h.store.session_count().await, 1);
    // The loser was rejected before its payment was authorized
    assert_eq!(h.payments.call_count(), 1);
}

#[tokio::test]
async fn equivalent_time_spellings_name_the_same_slot() {
    let h = Harness::new();
    book_online(&h).await;

    let mut cmd = book_cmd(THERAPIST, SessionType::Online);
    cmd.time = "10:00:00".to_string();
    let err = h
        .app
        .state
        .sessions
        .book
        .handle(cmd, meta(OTHER_CLIENT, Role::Client))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::SlotConflict(_)));
}

// =============================================================================
// Scenario B: confirmation issues a meeting link
// =============================================================================

#[tokio::test]
async fn therapist_confirmation_populates_meeting_link() {
    let h = Harness::new();
    let id = book_online(&h).await;

    let result = h
        .app
        .state
        .sessions
        .confirm
        .handle(ConfirmSessionCommand { session_id: id }, meta(THERAPIST, Role::Therapist))
        .await
        .unwrap();

    assert_eq!(result.session.status(), SessionStatus::Confirmed);
    let link = result.session.meet_link().unwrap();
    assert!(link.starts_with("https://meet.test/"));
    assert_eq!(status_of(&h, id).await, SessionStatus::Confirmed);
}

// =============================================================================
// Scenario C: only the session's client may complete it
// =============================================================================

#[tokio::test]
async fn other_client_cannot_complete() {
    let h = Harness::new();
    let id = book_online(&h).await;
    confirm(&h, id).await.unwrap();

    let err = h
        .app
        .state
        .sessions
        .complete
        .handle(
            CompleteSessionCommand {
                session_id: id,
                rating: 5,
                comment: None,
            },
            meta(OTHER_CLIENT, Role::Client),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::NotAuthorized(_)));
    assert_eq!(status_of(&h, id).await, SessionStatus::Confirmed);
}

// =============================================================================
// Scenario D: feedback completes the session
// =============================================================================

#[tokio::test]
async fn feedback_completes_session_and_is_retrievable() {
    let h = Harness::new();
    let id = book_online(&h).await;
    confirm(&h, id).await.unwrap();

    h.app
        .state
        .sessions
        .complete
        .handle(
            CompleteSessionCommand {
                session_id: id,
                rating: 5,
                comment: Some("Thank you".to_string()),
            },
            meta(CLIENT, Role::Client),
        )
        .await
        .unwrap();

    assert_eq!(status_of(&h, id).await, SessionStatus::Completed);

    let feedback = h
        .app
        .state
        .sessions
        .feedback
        .handle(GetSessionFeedbackQuery { session_id: id }, &actor(THERAPIST, Role::Therapist))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(feedback.rating, Rating::Excellent);
    assert_eq!(feedback.comment.as_deref(), Some("Thank you"));
}

// =============================================================================
// Scenario E: cancelled sessions are terminal
// =============================================================================

#[tokio::test]
async fn cancelled_session_cannot_be_confirmed() {
    let h = Harness::new();
    let id = book_online(&h).await;

    h.app
        .state
        .sessions
        .cancel
        .handle(CancelSessionCommand { session_id: id }, meta(CLIENT, Role::Client))
        .await
        .unwrap();
    assert_eq!(status_of(&h, id).await, SessionStatus::Cancelled);

    let err = confirm(&h, id).await.unwrap_err();
    assert_eq!(
        err,
        SessionError::invalid_transition(SessionStatus::Cancelled, SessionStatus::Confirmed)
    );
}

#[tokio::test]
async fn cancelling_frees_the_slot_for_a_new_booking() {
    let h = Harness::new();
    let id = book_online(&h).await;
    h.app
        .state
        .sessions
        .cancel
        .handle(CancelSessionCommand { session_id: id }, meta(CLIENT, Role::Client))
        .await
        .unwrap();

    let rebooked = h
        .app
        .state
        .sessions
        .book
        .handle(book_cmd(THERAPIST, SessionType::Online), meta(OTHER_CLIENT, Role::Client))
        .await
        .unwrap();
    assert_eq!(rebooked.session.status(), SessionStatus::Pending);
    assert_eq!(h.store.session_count().await, 2);
}

// =============================================================================
// Scenario F: delivery mode must be offered
// =============================================================================

#[tokio::test]
async fn in_person_booking_with_online_only_therapist_creates_nothing() {
    let h = Harness::new();

    let err = h
        .app
        .state
        .sessions
        .book
        .handle(book_cmd(THERAPIST, SessionType::InPerson), meta(CLIENT, Role::Client))
        .await
        .unwrap_err();

    assert_eq!(err, SessionError::InvalidSessionType(SessionType::InPerson));
    assert_eq!(h.store.session_count().await, 0);
    assert_eq!(h.payments.call_count(), 0);
}

#[tokio::test]
async fn in_person_session_is_confirmed_without_link() {
    let h = Harness::new();
    let booked = h
        .app
        .state
        .sessions
        .book
        .handle(
            book_cmd(IN_PERSON_THERAPIST, SessionType::InPerson),
            meta(CLIENT, Role::Client),
        )
        .await
        .unwrap();

    let confirmed = h
        .app
        .state
        .sessions
        .confirm
        .handle(
            ConfirmSessionCommand {
                session_id: *booked.session.id(),
            },
            meta(IN_PERSON_THERAPIST, Role::Therapist),
        )
        .await
        .unwrap();
    assert!(confirmed.session.meet_link().is_none());
}

// =============================================================================
// Events, notifications, listing and overview
// =============================================================================

#[tokio::test]
async fn full_lifecycle_publishes_events_and_notifies_both_parties() {
    let h = Harness::new();
    let id = book_online(&h).await;
    confirm(&h, id).await.unwrap();
    h.app
        .state
        .sessions
        .complete
        .handle(
            CompleteSessionCommand {
                session_id: id,
                rating: 4,
                comment: None,
            },
            meta(CLIENT, Role::Client),
        )
        .await
        .unwrap();

    let types: Vec<String> = h
        .app
        .events
        .events_for_aggregate(&id.to_string())
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(types, vec![SESSION_BOOKED, SESSION_CONFIRMED, SESSION_COMPLETED]);
    assert!(!h.app.events.has_event(SESSION_CANCELLED));

    let client_inbox = h.app.notifications.list_for(&uid(CLIENT)).await.unwrap();
    let therapist_inbox = h.app.notifications.list_for(&uid(THERAPIST)).await.unwrap();
    assert_eq!(client_inbox.len(), 3);
    assert_eq!(therapist_inbox.len(), 3);
    assert!(client_inbox.iter().all(|n| n.session_id == Some(id)));
}

#[tokio::test]
async fn listing_is_scoped_by_role() {
    let h = Harness::new();
    book_online(&h).await;
    h.app
        .state
        .sessions
        .book
        .handle(
            book_cmd(IN_PERSON_THERAPIST, SessionType::InPerson),
            meta(OTHER_CLIENT, Role::Client),
        )
        .await
        .unwrap();

    let list = |raw: &'static str, role: Role| {
        let handler = h.app.state.sessions.list.clone();
        async move {
            handler
                .handle(ListSessionsQuery::default(), &actor(raw, role))
                .await
                .unwrap()
        }
    };

    assert_eq!(list(CLIENT, Role::Client).await.total, 1);
    assert_eq!(list(THERAPIST, Role::Therapist).await.total, 1);
    assert_eq!(list(IN_PERSON_THERAPIST, Role::Therapist).await.total, 1);
    assert_eq!(list(ADMIN, Role::Admin).await.total, 2);
}

#[tokio::test]
async fn overview_counts_earnings_and_ratings() {
    let h = Harness::new();
    let id = book_online(&h).await;
    confirm(&h, id).await.unwrap();
    h.app
        .state
        .sessions
        .complete
        .handle(
            CompleteSessionCommand {
                session_id: id,
                rating: 4,
                comment: None,
            },
            meta(CLIENT, Role::Client),
        )
        .await
        .unwrap();
    h.app
        .state
        .sessions
        .book
        .handle(
            book_cmd(IN_PERSON_THERAPIST, SessionType::InPerson),
            meta(OTHER_CLIENT, Role::Client),
        )
        .await
        .unwrap();

    let platform = h
        .app
        .state
        .sessions
        .overview
        .handle(GetSessionOverviewQuery::default(), &actor(ADMIN, Role::Admin))
        .await
        .unwrap();
    assert_eq!(platform.total_sessions, 2);
    assert_eq!(platform.by_status.completed, 1);
    assert_eq!(platform.by_status.pending, 1);
    assert_eq!(platform.total_earnings.cents(), 2500);
    assert_eq!(platform.unique_clients, 2);
    assert_eq!(platform.average_rating, Some(4.0));

    // A therapist only ever sees their own figures
    let own = h
        .app
        .state
        .sessions
        .overview
        .handle(
            GetSessionOverviewQuery {
                therapist_id: Some(uid(IN_PERSON_THERAPIST)),
            },
            &actor(THERAPIST, Role::Therapist),
        )
        .await
        .unwrap();
    assert_eq!(own.total_sessions, 1);
    assert_eq!(own.by_status.completed, 1);

    let err = h
        .app
        .state
        .sessions
        .overview
        .handle(GetSessionOverviewQuery::default(), &actor(CLIENT, Role::Client))
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::NotAuthorized(_)));
}
