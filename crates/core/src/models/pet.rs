use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{required, visit::VisitResponse};
use crate::errors::{ClinicError, ClinicResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetType {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub birth_date: NaiveDate,
    pub pet_type: PetType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetForm {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub type_id: Option<Uuid>,
}

impl PetForm {
    /// Validates the form and builds the pet for `owner_id`.
    ///
    /// The birth date may not lie after `today` and the type must be one of
    /// `pet_types`.
    pub fn into_pet(
        self,
        id: Uuid,
        owner_id: Uuid,
        pet_types: &[PetType],
        today: NaiveDate,
    ) -> ClinicResult<Pet> {
        let name = required("name", self.name)?;

        let birth_date = self
            .birth_date
            .ok_or_else(|| ClinicError::Validation("birth_date is required".to_string()))?;
        if birth_date > today {
            return Err(ClinicError::Validation(
                "birth_date cannot be in the future".to_string(),
            ));
        }

        let type_id = self
            .type_id
            .ok_or_else(|| ClinicError::Validation("type_id is required".to_string()))?;
        let pet_type = pet_types
            .iter()
            .find(|t| t.id == type_id)
            .cloned()
            .ok_or_else(|| ClinicError::Validation(format!("Unknown pet type {}", type_id)))?;

        Ok(Pet {
            id,
            owner_id,
            name,
            birth_date,
            pet_type,
        })
    }
}

/// Returns true when one of the owner's other pets already carries `name`.
///
/// When editing, the pet's own record is left out by id. Names are compared
/// exactly, so "Rex" and "rex" are different pets.
pub fn pet_name_exists(name: &str, original: Option<&Pet>, owner_pets: &[Pet]) -> bool {
    owner_pets
        .iter()
        .filter(|pet| original.is_none_or(|original| pet.id != original.id))
        .any(|pet| pet.name == name)
}

/// A pet with its visits, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetDetails {
    #[serde(flatten)]
    pub pet: Pet,
    pub visits: Vec<VisitResponse>,
}
