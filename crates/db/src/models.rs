use chrono::NaiveDate;
use eyre::{Report, Result, WrapErr};
use petclinic_core::models::{
    owner::Owner,
    pet::{Pet, PetType},
    time_slot::SlotNumber,
    vet::Specialty,
    visit::Visit,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbOwner {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl From<DbOwner> for Owner {
    fn from(row: DbOwner) -> Self {
        Owner {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            address: row.address,
            city: row.city,
            telephone: row.telephone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPetType {
    pub id: Uuid,
    pub name: String,
}

impl From<DbPetType> for PetType {
    fn from(row: DbPetType) -> Self {
        PetType {
            id: row.id,
            name: row.name,
        }
    }
}

/// A pet row joined with its type's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub birth_date: NaiveDate,
    pub type_id: Uuid,
    pub type_name: String,
}

impl From<DbPet> for Pet {
    fn from(row: DbPet) -> Self {
        Pet {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            birth_date: row.birth_date,
            pet_type: PetType {
                id: row.type_id,
                name: row.type_name,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVet {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSpecialty {
    pub id: Uuid,
    pub name: String,
}

impl From<DbSpecialty> for Specialty {
    fn from(row: DbSpecialty) -> Self {
        Specialty {
            id: row.id,
            name: row.name,
        }
    }
}

/// A specialty as linked to one vet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVetSpecialty {
    pub vet_id: Uuid,
    pub specialty_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVisit {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub vet_id: Uuid,
    pub visit_date: NaiveDate,
    pub description: String,
    pub time_slot: i16,
}

impl TryFrom<DbVisit> for Visit {
    type Error = Report;

    fn try_from(row: DbVisit) -> Result<Self> {
        let time_slot = SlotNumber::new(row.time_slot)
            .wrap_err_with(|| format!("Visit {} has a corrupt time slot", row.id))?;

        Ok(Visit {
            id: row.id,
            pet_id: row.pet_id,
            vet_id: row.vet_id,
            date: row.visit_date,
            description: row.description,
            time_slot,
        })
    }
}
