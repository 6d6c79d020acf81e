//! Therapist directory port.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::therapist::TherapistProfile;
use async_trait::async_trait;

/// Source of therapist identity, rate and declared availability.
#[async_trait]
pub trait TherapistDirectory: Send + Sync {
    /// Returns `None` when no therapist has this id.
    async fn get_therapist(&self, id: &UserId) -> Result<Option<TherapistProfile>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn therapist_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn TherapistDirectory) {}
    }
}
