//! In-memory therapist directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::therapist::TherapistProfile;
use crate::ports::TherapistDirectory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryTherapistDirectory {
    profiles: Arc<RwLock<HashMap<UserId, TherapistProfile>>>,
}

impl InMemoryTherapistDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = TherapistProfile>) -> Self {
        let map = profiles.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            profiles: Arc::new(RwLock::new(map)),
        }
    }

    /// Loads a JSON array of profiles.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("cannot read {}: {}", path.display(), e))
        })?;
        let profiles: Vec<TherapistProfile> = serde_json::from_str(&raw).map_err(|e| {
            DomainError::new(ErrorCode::ValidationFailed, format!("invalid therapist file: {}", e))
                .with_detail("field", "therapists_file")
        })?;
        tracing::info!(path = %path.display(), count = profiles.len(), "therapist directory loaded");
        Ok(Self::with_profiles(profiles))
    }

    /// Adds or replaces a profile. Existing bookings keep their snapshotted price.
    pub async fn upsert(&self, profile: TherapistProfile) {
        self.profiles.write().await.insert(profile.id.clone(), profile);
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl TherapistDirectory for InMemoryTherapistDirectory {
    async fn get_therapist(&self, id: &UserId) -> Result<Option<TherapistProfile>, DomainError> {
        Ok(self.profiles.read().await.get(id).cloned())
    }
}
