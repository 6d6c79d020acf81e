use super::*;
use crate::domain::feedback::Rating;
use crate::domain::foundation::{Actor, Role, SessionId};
use crate::domain::session::{NewSession, Slot};

fn uid(s: &str) -> UserId {
    UserId::new(s).unwrap()
}

fn book(client: &str, time: &str, kind: SessionType, cents: i64) -> Session {
    Session::book(
        SessionId::new(),
        NewSession {
            client_id: uid(client),
            therapist_id: uid("therapist-1"),
            therapist_name: "Dr. Rivera".to_string(),
            slot: Slot::parse("2025-01-15", time).unwrap(),
            session_type: kind,
            price: Price::from_cents(cents).unwrap(),
            payment_transaction_id: None,
        },
    )
}

fn therapist() -> Actor {
    Actor::new(uid("therapist-1"), Role::Therapist)
}

fn complete(session: &mut Session, stars: i64) -> Feedback {
    session
        .confirm(&therapist(), Some("https://meet.example.com/x".to_string()))
        .unwrap();
    let client = Actor::new(session.client_id().clone(), Role::Client);
    let (_, feedback) = session
        .complete(&client, Rating::try_from_value(stars).unwrap(), None)
        .unwrap();
    feedback
}

#[test]
fn empty_input_yields_zeroes() {
    let overview = SessionOverview::compute(&[], &[]);
    assert_eq!(overview.total_sessions, 0);
    assert_eq!(overview.total_earnings, Price::zero());
    assert_eq!(overview.average_rating, None);
}

#[test]
fn counts_statuses_types_and_clients() {
    let pending = book("client-1", "09:00", SessionType::Online, 2500);
    let mut confirmed = book("client-2", "10:00", SessionType::InPerson, 2500);
    confirmed.confirm(&therapist(), None).unwrap();
    let mut cancelled = book("client-1", "11:00", SessionType::Online, 2500);
    cancelled
        .cancel(&therapist(), cancelled.slot().starts_at().add_hours(-1), 24)
        .unwrap();

    let overview = SessionOverview::compute(&[pending, confirmed, cancelled], &[]);

    assert_eq!(overview.total_sessions, 3);
    assert_eq!(overview.by_status.pending, 1);
    assert_eq!(overview.by_status.confirmed, 1);
    assert_eq!(overview.by_status.cancelled, 1);
    assert_eq!(overview.by_status.total(), 3);
    assert_eq!(overview.unique_clients, 2);
    assert_eq!(overview.online_sessions, 2);
    assert_eq!(overview.in_person_sessions, 1);
    assert_eq!(overview.late_cancellations, 1);
}

#[test]
fn earnings_only_count_completed_sessions() {
    let mut done_a = book("client-1", "09:00", SessionType::Online, 2500);
    let mut done_b = book("client-2", "10:00", SessionType::Online, 3000);
    let open = book("client-3", "11:00", SessionType::Online, 9999);
    let fa = complete(&mut done_a, 5);
    let fb = complete(&mut done_b, 4);

    let overview = SessionOverview::compute(&[done_a, done_b, open], &[fa, fb]);

    assert_eq!(overview.total_earnings.cents(), 5500);
    assert_eq!(overview.feedback_count, 2);
    assert_eq!(overview.average_rating, Some(4.5));
}

#[test]
fn feedback_for_other_sessions_is_ignored() {
    let mut mine = book("client-1", "09:00", SessionType::Online, 2500);
    let mut other = book("client-2", "10:00", SessionType::Online, 2500);
    let f_mine = complete(&mut mine, 2);
    let f_other = complete(&mut other, 5);

    let overview = SessionOverview::compute(&[mine], &[f_mine, f_other]);
    assert_eq!(overview.feedback_count, 1);
    assert_eq!(overview.average_rating, Some(2.0));
}

#[test]
fn serializes_camel_case() {
    let json = serde_json::to_value(SessionOverview::compute(&[], &[])).unwrap();
    assert!(json.get("totalEarnings").is_some());
    assert!(json.get("byStatus").is_some());
}
