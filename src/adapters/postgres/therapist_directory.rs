//! PostgreSQL-backed therapist directory.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::session::{Price, Slot};
use crate::domain::therapist::TherapistProfile;
use crate::ports::TherapistDirectory;

use super::rows::db_error;

#[derive(Clone)]
pub struct PostgresTherapistDirectory {
    pool: PgPool,
}

impl PostgresTherapistDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or replaces a profile.
    pub async fn upsert(&self, profile: &TherapistProfile) -> Result<(), DomainError> {
        let availability: Vec<String> = profile.availability.iter().map(|s| s.to_string()).collect();
        sqlx::query(
            r#"
            INSERT INTO therapists (id, name, price_cents, accepts_in_person, specializations, availability)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                price_cents = EXCLUDED.price_cents,
                accepts_in_person = EXCLUDED.accepts_in_person,
                specializations = EXCLUDED.specializations,
                availability = EXCLUDED.availability,
                updated_at = NOW()
            "#,
        )
        .bind(profile.id.as_str())
        .bind(&profile.name)
        .bind(profile.price.cents())
        .bind(profile.accepts_in_person)
        .bind(&profile.specializations)
        .bind(&availability)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to upsert therapist", e))?;
        Ok(())
    }
}

#[async_trait]
impl TherapistDirectory for PostgresTherapistDirectory {
    async fn get_therapist(&self, id: &UserId) -> Result<Option<TherapistProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT name, price_cents, accepts_in_person, specializations, availability
            FROM therapists WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch therapist", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let name: String = row.try_get("name").map_err(|e| db_error("Failed to get name", e))?;
        let price_cents: i64 = row
            .try_get("price_cents")
            .map_err(|e| db_error("Failed to get price_cents", e))?;
        let accepts_in_person: bool = row
            .try_get("accepts_in_person")
            .map_err(|e| db_error("Failed to get accepts_in_person", e))?;
        let specializations: Vec<String> = row
            .try_get("specializations")
            .map_err(|e| db_error("Failed to get specializations", e))?;
        let raw_slots: Vec<String> = row
            .try_get("availability")
            .map_err(|e| db_error("Failed to get availability", e))?;

        let price = Price::from_cents(price_cents)
            .map_err(|e| DomainError::database(format!("Invalid price_cents: {}", e)))?;

        // An unparseable entry is skipped rather than hiding the whole profile
        let availability = raw_slots.iter().filter_map(|raw| match Slot::parse_combined(raw) {
            Ok(slot) => Some(slot),
            Err(e) => {
                tracing::warn!(therapist_id = %id, value = %raw, error = %e, "skipping bad availability entry");
                None
            }
        });

        Ok(Some(
            TherapistProfile::new(id.clone(), name, price)
                .with_in_person(accepts_in_person)
                .with_specializations(specializations)
                .with_availability(availability),
        ))
    }
}
