use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{Report, Result};
use mockall::automock;
use petclinic_core::{booking::BookingRejection, models::visit::Visit};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbVisit;

#[automock]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Visit>>;

    /// A pet's visits, most recent first.
    async fn find_by_pet_id(&self, pet_id: Uuid) -> Result<Vec<Visit>>;

    /// Slot numbers already booked for the vet on `date`.
    async fn find_booked_slots(&self, vet_id: Uuid, date: NaiveDate) -> Result<Vec<i16>>;

    /// Stores the visit.
    ///
    /// Fails with a [`BookingRejection::SlotTaken`] report when another visit
    /// already holds the same vet, day and slot.
    async fn save(&self, visit: &Visit) -> Result<Visit>;

    async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}

pub struct PgVisitRepository {
    pool: Pool<Postgres>,
}

impl PgVisitRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Visit>> {
        let row = sqlx::query_as::<_, DbVisit>(
            r#"
            SELECT id, pet_id, vet_id, visit_date, description, time_slot
            FROM visits
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Visit::try_from).transpose()
    }

    async fn find_by_pet_id(&self, pet_id: Uuid) -> Result<Vec<Visit>> {
        let rows = sqlx::query_as::<_, DbVisit>(
            r#"
            SELECT id, pet_id, vet_id, visit_date, description, time_slot
            FROM visits
            WHERE pet_id = $1
            ORDER BY visit_date DESC, time_slot DESC
            "#,
        )
        .bind(pet_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Visit::try_from).collect()
    }

    async fn find_booked_slots(&self, vet_id: Uuid, date: NaiveDate) -> Result<Vec<i16>> {
        let slots = sqlx::query_scalar::<_, i16>(
            r#"
            SELECT time_slot
            FROM visits
            WHERE vet_id = $1 AND visit_date = $2
            ORDER BY time_slot
            "#,
        )
        .bind(vet_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            "Booked slots for vet {} on {}: {:?}",
            vet_id, date, slots
        );

        Ok(slots)
    }

    async fn save(&self, visit: &Visit) -> Result<Visit> {
        let row = sqlx::query_as::<_, DbVisit>(
            r#"
            INSERT INTO visits (id, pet_id, vet_id, visit_date, description, time_slot)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET vet_id = EXCLUDED.vet_id,
                visit_date = EXCLUDED.visit_date,
                description = EXCLUDED.description,
                time_slot = EXCLUDED.time_slot
            RETURNING id, pet_id, vet_id, visit_date, description, time_slot
            "#,
        )
        .bind(visit.id)
        .bind(visit.pet_id)
        .bind(visit.vet_id)
        .bind(visit.date)
        .bind(&visit.description)
        .bind(i16::from(visit.time_slot))
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            let slot_taken = matches!(
                &err,
                sqlx::Error::Database(db_err) if db_err.is_unique_violation()
            );
            if slot_taken {
                Report::new(BookingRejection::SlotTaken(visit.time_slot))
            } else {
                Report::new(err)
            }
        })?;

        row.try_into()
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM visits
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
