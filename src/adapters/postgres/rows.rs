//! Row decoding shared by the Postgres adapters.

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::feedback::{Feedback, Rating};
use crate::domain::foundation::{DomainError, FeedbackId, SessionId, Timestamp, UserId};
use crate::domain::session::{Price, Session, SessionSnapshot, SessionStatus, SessionType, Slot};

/// Columns selected wherever a full session row is read.
pub(super) const SESSION_COLUMNS: &str = "id, client_id, therapist_id, therapist_name, date, time, \
     session_type, price_cents, status, meet_link, payment_transaction_id, cancelled_by, \
     late_cancellation, created_at, updated_at";

pub(super) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::database(format!("{}: {}", context, err))
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

fn user_id(raw: String, name: &str) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|e| DomainError::database(format!("Invalid {}: {}", name, e)))
}

pub(super) fn row_to_session(row: &PgRow) -> Result<Session, DomainError> {
    let status: String = column(row, "status")?;
    let session_type: String = column(row, "session_type")?;
    let cancelled_by: Option<String> = column(row, "cancelled_by")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(Session::reconstitute(SessionSnapshot {
        id: SessionId::from_uuid(column(row, "id")?),
        client_id: user_id(column(row, "client_id")?, "client_id")?,
        therapist_id: user_id(column(row, "therapist_id")?, "therapist_id")?,
        therapist_name: column(row, "therapist_name")?,
        slot: Slot::new(column(row, "date")?, column(row, "time")?),
        session_type: session_type
            .parse::<SessionType>()
            .map_err(|e| DomainError::database(format!("Invalid session_type: {}", e)))?,
        price: Price::from_cents(column(row, "price_cents")?)
            .map_err(|e| DomainError::database(format!("Invalid price_cents: {}", e)))?,
        status: status
            .parse::<SessionStatus>()
            .map_err(|e| DomainError::database(format!("Invalid status: {}", e)))?,
        meet_link: column(row, "meet_link")?,
        payment_transaction_id: column(row, "payment_transaction_id")?,
        cancelled_by: cancelled_by
            .map(|raw| user_id(raw, "cancelled_by"))
            .transpose()?,
        late_cancellation: column(row, "late_cancellation")?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    }))
}

pub(super) fn row_to_feedback(row: &PgRow) -> Result<Feedback, DomainError> {
    let rating: i16 = column(row, "rating")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;

    Ok(Feedback {
        id: FeedbackId::from_uuid(column(row, "id")?),
        session_id: SessionId::from_uuid(column(row, "session_id")?),
        client_id: user_id(column(row, "client_id")?, "client_id")?,
        therapist_id: user_id(column(row, "therapist_id")?, "therapist_id")?,
        rating: Rating::try_from_value(rating as i64)
            .map_err(|e| DomainError::database(format!("Invalid rating: {}", e)))?,
        comment: column(row, "comment")?,
        created_at: Timestamp::from_datetime(created_at),
    })
}
