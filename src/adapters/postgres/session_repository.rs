//! PostgreSQL implementation of SessionRepository.
//!
//! Slot exclusivity is enforced by the `sessions_active_slot_idx` partial
//! unique index; transitions are conditional updates on the expected status.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::session::{Session, SessionStatus, Slot};
use crate::ports::{
    session_not_found_error, slot_conflict_error, stale_status_error, SessionRepository,
};

use super::rows::{db_error, row_to_session, SESSION_COLUMNS};

const ACTIVE_SLOT_INDEX: &str = "sessions_active_slot_idx";

#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Conditional update of the lifecycle columns inside `tx`.
    async fn swap_status(
        tx: &mut Transaction<'_, Postgres>,
        session: &Session,
        expected: SessionStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                status = $2,
                meet_link = $3,
                cancelled_by = $4,
                late_cancellation = $5,
                updated_at = $6
            WHERE id = $1 AND status = $7
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.status().as_str())
        .bind(session.meet_link())
        .bind(session.cancelled_by().map(|u| u.as_str()))
        .bind(session.is_late_cancellation())
        .bind(session.updated_at().as_datetime())
        .bind(expected.as_str())
        .execute(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to update session", e))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Lost the compare-and-swap; report what the row holds now
        let current: Option<String> = sqlx::query("SELECT status FROM sessions WHERE id = $1")
            .bind(session.id().as_uuid())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| db_error("Failed to read session status", e))?
            .map(|row| row.try_get::<String, _>("status"))
            .transpose()
            .map_err(|e| db_error("Failed to get status", e))?;

        match current {
            None => Err(session_not_found_error(session.id())),
            Some(raw) => {
                let found = raw
                    .parse::<SessionStatus>()
                    .map_err(|e| DomainError::database(format!("Invalid status: {}", e)))?;
                Err(stale_status_error(found, session.status()))
            }
        }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO sessions (
                id, client_id, therapist_id, therapist_name, date, time, session_type,
                price_cents, status, meet_link, payment_transaction_id, cancelled_by,
                late_cancellation, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.client_id().as_str())
        .bind(session.therapist_id().as_str())
        .bind(session.therapist_name())
        .bind(session.slot().date())
        .bind(session.slot().time())
        .bind(session.session_type().as_str())
        .bind(session.price().cents())
        .bind(session.status().as_str())
        .bind(session.meet_link())
        .bind(session.payment_transaction_id())
        .bind(session.cancelled_by().map(|u| u.as_str()))
        .bind(session.is_late_cancellation())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if db_err.is_unique_violation() && db_err.constraint() == Some(ACTIVE_SLOT_INDEX) =>
            {
                tracing::debug!(
                    therapist_id = %session.therapist_id(),
                    slot = %session.slot(),
                    "slot insert lost to an active booking"
                );
                Err(slot_conflict_error(session.slot()))
            }
            Err(e) => Err(db_error("Failed to insert session", e)),
        }
    }

    async fn update_if_status(
        &self,
        session: &Session,
        expected: SessionStatus,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        Self::swap_status(&mut tx, session, expected).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))
    }

    async fn complete_with_feedback(
        &self,
        session: &Session,
        feedback: &Feedback,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        // Dropping the transaction on error rolls the status change back
        Self::swap_status(&mut tx, session, SessionStatus::Confirmed).await?;

        sqlx::query(
            r#"
            INSERT INTO feedback (id, session_id, client_id, therapist_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(feedback.id.as_uuid())
        .bind(feedback.session_id.as_uuid())
        .bind(feedback.client_id.as_str())
        .bind(feedback.therapist_id.as_str())
        .bind(feedback.rating.stars() as i16)
        .bind(feedback.comment.as_deref())
        .bind(feedback.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert feedback", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM sessions WHERE id = $1", SESSION_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch session", e))?;

        row.as_ref().map(row_to_session).transpose()
    }

    async fn find_active_in_slot(
        &self,
        therapist_id: &UserId,
        slot: &Slot,
    ) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sessions \
             WHERE therapist_id = $1 AND date = $2 AND time = $3 \
               AND status IN ('pending', 'confirmed')",
            SESSION_COLUMNS
        ))
        .bind(therapist_id.as_str())
        .bind(slot.date())
        .bind(slot.time())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch active slot", e))?;

        row.as_ref().map(row_to_session).transpose()
    }
}
