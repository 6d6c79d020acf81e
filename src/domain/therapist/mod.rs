//! Therapist directory entries, as seen by the booking core.

mod profile;

pub use profile::TherapistProfile;
