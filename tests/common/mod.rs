//! Shared fixtures for the integration tests.
//!
//! Everything runs on the in-memory adapters, which provide the same slot
//! exclusivity and status compare-and-swap guarantees as PostgreSQL.

#![allow(dead_code)]

use std::sync::Arc;

use therapy_booking::adapters::{
    InMemoryEventBus, InMemorySessionStore, InMemoryTherapistDirectory, MockPaymentGateway,
    MockTokenValidator, NotificationCenter, StaticMeetingLinkProvider,
};
use therapy_booking::app::{App, BookingRules, Infrastructure};
use therapy_booking::domain::foundation::{Actor, CommandMetadata, Role, UserId};
use therapy_booking::domain::session::Price;
use therapy_booking::domain::therapist::TherapistProfile;

pub const CLIENT: &str = "client-1";
pub const OTHER_CLIENT: &str = "client-2";
pub const THERAPIST: &str = "therapist-1";
pub const IN_PERSON_THERAPIST: &str = "therapist-2";
pub const ADMIN: &str = "admin-1";

pub const DATE: &str = "2025-01-15";
pub const TIME: &str = "10:00";

pub fn uid(raw: &str) -> UserId {
    UserId::new(raw).unwrap()
}

pub fn actor(raw: &str, role: Role) -> Actor {
    Actor::new(uid(raw), role)
}

pub fn meta(raw: &str, role: Role) -> CommandMetadata {
    CommandMetadata::new(actor(raw, role)).with_source("test")
}

/// Online-only therapist charging 2500.
pub fn online_therapist() -> TherapistProfile {
    TherapistProfile::new(uid(THERAPIST), "Dr. Asha Rao", Price::from_cents(2500).unwrap())
}

/// Offers both modes at 4000.
pub fn in_person_therapist() -> TherapistProfile {
    TherapistProfile::new(
        uid(IN_PERSON_THERAPIST),
        "Dr. Vikram Shah",
        Price::from_cents(4000).unwrap(),
    )
    .with_in_person(true)
}

pub struct Harness {
    pub app: App,
    pub store: InMemorySessionStore,
    pub payments: MockPaymentGateway,
    pub directory: InMemoryTherapistDirectory,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_payments(MockPaymentGateway::new())
    }

    pub fn with_payments(payments: MockPaymentGateway) -> Self {
        let store = InMemorySessionStore::new();
        let directory =
            InMemoryTherapistDirectory::with_profiles([online_therapist(), in_person_therapist()]);
        let tokens = MockTokenValidator::new()
            .with_test_user("client-token", CLIENT, Role::Client)
            .with_test_user("other-client-token", OTHER_CLIENT, Role::Client)
            .with_test_user("therapist-token", THERAPIST, Role::Therapist)
            .with_test_user("in-person-therapist-token", IN_PERSON_THERAPIST, Role::Therapist)
            .with_test_user("admin-token", ADMIN, Role::Admin);

        let infra = Infrastructure::in_memory(
            store.clone(),
            Arc::new(directory.clone()),
            Arc::new(payments.clone()),
            Arc::new(StaticMeetingLinkProvider::new("https://meet.test")),
            Arc::new(tokens),
        );
        let app = App::assemble(
            infra,
            &BookingRules::default(),
            Arc::new(InMemoryEventBus::new()),
            Arc::new(NotificationCenter::new()),
        );

        Self {
            app,
            store,
            payments,
            directory,
        }
    }
}
