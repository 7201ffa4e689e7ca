use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::required;
use crate::{
    errors::{ClinicError, ClinicResult},
    person::Named,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vet {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<Specialty>,
}

impl Named for Vet {
    fn first_name(&self) -> Option<&str> {
        Some(&self.first_name)
    }

    fn last_name(&self) -> Option<&str> {
        Some(&self.last_name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VetForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub specialty_ids: Vec<Uuid>,
}

impl VetForm {
    /// Validates the form against the known specialties and builds the vet.
    ///
    /// Specialties are kept in catalog order; repeated ids collapse.
    pub fn into_vet(self, id: Uuid, catalog: &[Specialty]) -> ClinicResult<Vet> {
        let first_name = required("first_name", self.first_name)?;
        let last_name = required("last_name", self.last_name)?;

        let requested: HashSet<Uuid> = self.specialty_ids.into_iter().collect();
        if let Some(unknown) = requested
            .iter()
            .find(|id| !catalog.iter().any(|s| s.id == **id))
        {
            return Err(ClinicError::Validation(format!("Unknown specialty {}", unknown)));
        }

        let specialties = catalog
            .iter()
            .filter(|s| requested.contains(&s.id))
            .cloned()
            .collect();

        Ok(Vet {
            id,
            first_name,
            last_name,
            specialties,
        })
    }
}
