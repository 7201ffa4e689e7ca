use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const PET_TYPES: [&str; 6] = ["bird", "cat", "dog", "hamster", "lizard", "snake"];
const SPECIALTIES: [&str; 3] = ["dentistry", "radiology", "surgery"];

const INDEXES: [&str; 5] = [
    "CREATE INDEX IF NOT EXISTS idx_owners_last_name ON owners(last_name)",
    "CREATE INDEX IF NOT EXISTS idx_pets_owner_id ON pets(owner_id)",
    "CREATE INDEX IF NOT EXISTS idx_visits_pet_id ON visits(pet_id)",
    "CREATE INDEX IF NOT EXISTS idx_vet_specialties_vet_id ON vet_specialties(vet_id)",
    // One visit per vet, day and slot
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_visits_vet_day_slot ON visits(vet_id, visit_date, time_slot)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");
    
    // Create owners table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS owners (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name VARCHAR(30) NOT NULL,
            last_name VARCHAR(30) NOT NULL,
            address VARCHAR(255) NOT NULL,
            city VARCHAR(80) NOT NULL,
            telephone VARCHAR(20) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create pet_types table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pet_types (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(80) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create pets table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pets (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            owner_id UUID NOT NULL REFERENCES owners(id),
            name VARCHAR(30) NOT NULL,
            birth_date DATE NOT NULL,
            type_id UUID NOT NULL REFERENCES pet_types(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create specialties table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS specialties (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(80) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create vets table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vets (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name VARCHAR(30) NOT NULL,
            last_name VARCHAR(30) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create vet_specialties table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vet_specialties (
            vet_id UUID NOT NULL REFERENCES vets(id) ON DELETE CASCADE,
            specialty_id UUID NOT NULL REFERENCES specialties(id),
            PRIMARY KEY (vet_id, specialty_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create visits table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS visits (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            pet_id UUID NOT NULL REFERENCES pets(id),
            vet_id UUID NOT NULL REFERENCES vets(id),
            visit_date DATE NOT NULL,
            description VARCHAR(255) NOT NULL,
            time_slot SMALLINT NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_slot CHECK (time_slot BETWEEN 1 AND 9)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}

/// Inserts the pet types and vet specialties the clinic works with.
///
/// Existing rows are left untouched, so this can run on every start.
pub async fn seed_reference_data(pool: &Pool<Postgres>) -> Result<()> {
    info!("Seeding reference data...");

    for name in PET_TYPES {
        sqlx::query(
            r#"
            INSERT INTO pet_types (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .execute(pool)
        .await?;
    }

    for name in SPECIALTIES {
        sqlx::query(
            r#"
            INSERT INTO specialties (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .execute(pool)
        .await?;
    }

    info!(
        "Reference data ready: {} pet types, {} specialties",
        PET_TYPES.len(),
        SPECIALTIES.len()
    );
    Ok(())
}
