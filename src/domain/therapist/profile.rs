use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::session::{Price, SessionType, Slot};

/// What the booking core needs to know about a therapist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapistProfile {
    pub id: UserId,
    pub name: String,
    /// Current per-session rate; copied onto each booking.
    pub price: Price,
    pub accepts_in_person: bool,
    #[serde(default)]
    pub specializations: Vec<String>,
    /// Declared bookable slots. Empty means no declared schedule, in which
    /// case any well-formed slot may be requested.
    #[serde(default)]
    pub availability: Vec<Slot>,
}

impl TherapistProfile {
    pub fn new(id: UserId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            accepts_in_person: false,
            specializations: Vec::new(),
            availability: Vec::new(),
        }
    }

    pub fn with_in_person(mut self, accepts: bool) -> Self {
        self.accepts_in_person = accepts;
        self
    }

    pub fn with_availability(mut self, slots: impl IntoIterator<Item = Slot>) -> Self {
        self.availability = slots.into_iter().collect();
        self
    }

    pub fn with_specializations(mut self, specs: impl IntoIterator<Item = String>) -> Self {
        self.specializations = specs.into_iter().collect();
        self
    }

    /// Online is always offered; in-person only when the therapist opts in.
    pub fn offers(&self, session_type: SessionType) -> bool {
        match session_type {
            SessionType::Online => true,
            SessionType::InPerson => self.accepts_in_person,
        }
    }

    pub fn offers_slot(&self, slot: &Slot) -> bool {
        self.availability.is_empty() || self.availability.contains(slot)
    }
}
