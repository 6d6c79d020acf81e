use serde::{Deserialize, Serialize};

use super::Rating;
use crate::domain::foundation::{FeedbackId, SessionId, Timestamp, UserId, ValidationError};

/// Maximum length for the free-text comment.
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// A client's rating of a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub session_id: SessionId,
    pub client_id: UserId,
    pub therapist_id: UserId,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl Feedback {
    /// Builds a feedback record. Blank comments are stored as `None`.
    pub fn new(
        session_id: SessionId,
        client_id: UserId,
        therapist_id: UserId,
        rating: Rating,
        comment: Option<String>,
    ) -> Result<Self, ValidationError> {
        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        if let Some(text) = &comment {
            let len = text.chars().count();
            if len > MAX_COMMENT_LENGTH {
                return Err(ValidationError::out_of_range(
                    "comment",
                    0,
                    MAX_COMMENT_LENGTH as i64,
                    len as i64,
                ));
            }
        }

        Ok(Self {
            id: FeedbackId::new(),
            session_id,
            client_id,
            therapist_id,
            rating,
            comment,
            created_at: Timestamp::now(),
        })
    }
}
