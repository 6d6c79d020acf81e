//! PostgreSQL implementation of FeedbackReader.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::FeedbackReader;

use super::rows::{db_error, row_to_feedback};

const FEEDBACK_COLUMNS: &str = "id, session_id, client_id, therapist_id, rating, comment, created_at";

#[derive(Clone)]
pub struct PostgresFeedbackReader {
    pool: PgPool,
}

impl PostgresFeedbackReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackReader for PostgresFeedbackReader {
    async fn find_by_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<Feedback>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM feedback WHERE session_id = $1",
            FEEDBACK_COLUMNS
        ))
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch feedback", e))?;

        row.as_ref().map(row_to_feedback).transpose()
    }

    async fn find_for_sessions(
        &self,
        session_ids: &[SessionId],
    ) -> Result<Vec<Feedback>, DomainError> {
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = session_ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(&format!(
            "SELECT {} FROM feedback WHERE session_id = ANY($1)",
            FEEDBACK_COLUMNS
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch feedback", e))?;

        rows.iter().map(row_to_feedback).collect()
    }
}
