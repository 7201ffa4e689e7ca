use async_trait::async_trait;
use eyre::Result;
use mockall::automock;
use petclinic_core::models::owner::Owner;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbOwner;

#[automock]
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Owner>>;

    /// Owners whose last name starts with `last_name`, ignoring case. An
    /// empty prefix returns every owner.
    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>>;

    /// Inserts the owner or overwrites the stored record with the same id.
    async fn save(&self, owner: &Owner) -> Result<Owner>;
}

pub struct PgOwnerRepository {
    pool: Pool<Postgres>,
}

impl PgOwnerRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Escapes ILIKE wildcards so user input only ever matches literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl OwnerRepository for PgOwnerRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Owner>> {
        tracing::debug!("Getting owner by id: {}", id);

        let owner = sqlx::query_as::<_, DbOwner>(
            r#"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner.map(Owner::from))
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>> {
        tracing::debug!("Finding owners by last name prefix: {:?}", last_name);

        let owners = sqlx::query_as::<_, DbOwner>(
            r#"
            SELECT id, first_name, last_name, address, city, telephone
            FROM owners
            WHERE last_name ILIKE $1
            ORDER BY last_name, first_name
            "#,
        )
        .bind(like_prefix(last_name))
        .fetch_all(&self.pool)
        .await?;

        Ok(owners.into_iter().map(Owner::from).collect())
    }

    async fn save(&self, owner: &Owner) -> Result<Owner> {
        tracing::debug!("Saving owner: id={}", owner.id);

        let saved = sqlx::query_as::<_, DbOwner>(
            r#"
            INSERT INTO owners (id, first_name, last_name, address, city, telephone)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                address = EXCLUDED.address,
                city = EXCLUDED.city,
                telephone = EXCLUDED.telephone
            RETURNING id, first_name, last_name, address, city, telephone
            "#,
        )
        .bind(owner.id)
        .bind(&owner.first_name)
        .bind(&owner.last_name)
        .bind(&owner.address)
        .bind(&owner.city)
        .bind(&owner.telephone)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved.into())
    }
}
