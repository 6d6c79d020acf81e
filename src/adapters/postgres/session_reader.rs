//! PostgreSQL implementation of SessionReader.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::foundation::DomainError;
use crate::domain::session::{Session, SessionStatus};
use crate::ports::{ListOptions, SessionList, SessionReader, SessionScope};

use super::rows::{db_error, row_to_session, SESSION_COLUMNS};

#[derive(Clone)]
pub struct PostgresSessionReader {
    pool: PgPool,
}

impl PostgresSessionReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Appends the WHERE clause for a scope and optional status.
fn push_filters<'a>(
    query: &mut QueryBuilder<'a, Postgres>,
    scope: &'a SessionScope,
    status: Option<SessionStatus>,
) {
    query.push(" WHERE TRUE");
    match scope {
        SessionScope::Client(id) => {
            query.push(" AND client_id = ").push_bind(id.as_str());
        }
        SessionScope::Therapist(id) => {
            query.push(" AND therapist_id = ").push_bind(id.as_str());
        }
        SessionScope::All => {}
    }
    if let Some(status) = status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
}

#[async_trait]
impl SessionReader for PostgresSessionReader {
    async fn list(
        &self,
        scope: &SessionScope,
        options: &ListOptions,
    ) -> Result<SessionList, DomainError> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) AS total FROM sessions");
        push_filters(&mut count_query, scope, options.status);
        let total: i64 = count_query
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count sessions", e))?
            .try_get("total")
            .map_err(|e| db_error("Failed to get total", e))?;

        let mut query = QueryBuilder::new(format!("SELECT {} FROM sessions", SESSION_COLUMNS));
        push_filters(&mut query, scope, options.status);
        query.push(" ORDER BY created_at DESC, id ASC");
        if let Some(limit) = options.limit {
            query.push(" LIMIT ").push_bind(limit as i64);
        }
        if let Some(offset) = options.offset {
            query.push(" OFFSET ").push_bind(offset as i64);
        }

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list sessions", e))?;
        let items = rows.iter().map(row_to_session).collect::<Result<Vec<_>, _>>()?;

        let total = total.max(0) as u64;
        let offset = options.offset.unwrap_or(0) as u64;
        let has_more = offset + (items.len() as u64) < total;

        Ok(SessionList {
            items,
            total,
            has_more,
        })
    }

    async fn all_in_scope(&self, scope: &SessionScope) -> Result<Vec<Session>, DomainError> {
        let mut query = QueryBuilder::new(format!("SELECT {} FROM sessions", SESSION_COLUMNS));
        push_filters(&mut query, scope, None);
        query.push(" ORDER BY created_at DESC, id ASC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to load sessions", e))?;
        rows.iter().map(row_to_session).collect()
    }
}
