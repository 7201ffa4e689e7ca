use async_trait::async_trait;
use eyre::Result;
use mockall::automock;
use petclinic_core::models::pet::{Pet, PetType};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbPet, DbPetType};

#[automock]
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>>;

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Pet>>;

    async fn find_pet_types(&self) -> Result<Vec<PetType>>;

    /// Inserts the pet or overwrites the stored record with the same id.
    async fn save(&self, pet: &Pet) -> Result<Pet>;
}

pub struct PgPetRepository {
    pool: Pool<Postgres>,
}

impl PgPetRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for PgPetRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>> {
        let pet = sqlx::query_as::<_, DbPet>(
            r#"
            SELECT p.id, p.owner_id, p.name, p.birth_date, p.type_id, t.name AS type_name
            FROM pets p
            JOIN pet_types t ON t.id = p.type_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(pet.map(Pet::from))
    }

    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Pet>> {
        let pets = sqlx::query_as::<_, DbPet>(
            r#"
            SELECT p.id, p.owner_id, p.name, p.birth_date, p.type_id, t.name AS type_name
            FROM pets p
            JOIN pet_types t ON t.id = p.type_id
            WHERE p.owner_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(pets.into_iter().map(Pet::from).collect())
    }

    async fn find_pet_types(&self) -> Result<Vec<PetType>> {
        let types = sqlx::query_as::<_, DbPetType>(
            r#"
            SELECT id, name
            FROM pet_types
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types.into_iter().map(PetType::from).collect())
    }

    async fn save(&self, pet: &Pet) -> Result<Pet> {
        tracing::debug!("Saving pet: id={}, owner_id={}", pet.id, pet.owner_id);

        let saved = sqlx::query_as::<_, DbPet>(
            r#"
            WITH saved AS (
                INSERT INTO pets (id, owner_id, name, birth_date, type_id)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    birth_date = EXCLUDED.birth_date,
                    type_id = EXCLUDED.type_id
                RETURNING id, owner_id, name, birth_date, type_id
            )
            SELECT s.id, s.owner_id, s.name, s.birth_date, s.type_id, t.name AS type_name
            FROM saved s
            JOIN pet_types t ON t.id = s.type_id
            "#,
        )
        .bind(pet.id)
        .bind(pet.owner_id)
        .bind(&pet.name)
        .bind(pet.birth_date)
        .bind(pet.pet_type.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved.into())
    }
}
