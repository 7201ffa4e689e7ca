use std::collections::HashMap;

use async_trait::async_trait;
use eyre::Result;
use mockall::automock;
use petclinic_core::models::vet::{Specialty, Vet};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbSpecialty, DbVet, DbVetSpecialty};

#[automock]
#[async_trait]
pub trait VetRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Vet>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vet>>;

    async fn find_specialties(&self) -> Result<Vec<Specialty>>;

    /// Inserts or overwrites the vet and replaces their specialty links.
    async fn save(&self, vet: &Vet) -> Result<Vet>;
}

pub struct PgVetRepository {
    pool: Pool<Postgres>,
}

impl PgVetRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn specialties_by_vet(&self, vet_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Specialty>>> {
        let links = sqlx::query_as::<_, DbVetSpecialty>(
            r#"
            SELECT vs.vet_id, s.id AS specialty_id, s.name
            FROM vet_specialties vs
            JOIN specialties s ON s.id = vs.specialty_id
            WHERE vs.vet_id = ANY($1)
            ORDER BY s.name
            "#,
        )
        .bind(vet_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_vet: HashMap<Uuid, Vec<Specialty>> = HashMap::new();
        for link in links {
            by_vet.entry(link.vet_id).or_default().push(Specialty {
                id: link.specialty_id,
                name: link.name,
            });
        }

        Ok(by_vet)
    }
}

fn with_specialties(row: DbVet, specialties: &mut HashMap<Uuid, Vec<Specialty>>) -> Vet {
    Vet {
        specialties: specialties.remove(&row.id).unwrap_or_default(),
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
    }
}

#[async_trait]
impl VetRepository for PgVetRepository {
    async fn find_all(&self) -> Result<Vec<Vet>> {
        let rows = sqlx::query_as::<_, DbVet>(
            r#"
            SELECT id, first_name, last_name
            FROM vets
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut specialties = self.specialties_by_vet(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| with_specialties(row, &mut specialties))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Vet>> {
        let row = sqlx::query_as::<_, DbVet>(
            r#"
            SELECT id, first_name, last_name
            FROM vets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut specialties = self.specialties_by_vet(&[row.id]).await?;
                Ok(Some(with_specialties(row, &mut specialties)))
            }
            None => Ok(None),
        }
    }

    async fn find_specialties(&self) -> Result<Vec<Specialty>> {
        let specialties = sqlx::query_as::<_, DbSpecialty>(
            r#"
            SELECT id, name
            FROM specialties
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(specialties.into_iter().map(Specialty::from).collect())
    }

    async fn save(&self, vet: &Vet) -> Result<Vet> {
        tracing::debug!(
            "Saving vet: id={}, specialties={}",
            vet.id,
            vet.specialties.len()
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO vets (id, first_name, last_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name
            "#,
        )
        .bind(vet.id)
        .bind(&vet.first_name)
        .bind(&vet.last_name)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            DELETE FROM vet_specialties
            WHERE vet_id = $1
            "#,
        )
        .bind(vet.id)
        .execute(&mut *tx)
        .await?;

        for specialty in &vet.specialties {
            sqlx::query(
                r#"
                INSERT INTO vet_specialties (vet_id, specialty_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(vet.id)
            .bind(specialty.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(vet.clone())
    }
}
