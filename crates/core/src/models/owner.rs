use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{pet::PetDetails, required};
use crate::{
    errors::{ClinicError, ClinicResult},
    person::Named,
};

const MAX_TELEPHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl Named for Owner {
    fn first_name(&self) -> Option<&str> {
        Some(&self.first_name)
    }

    fn last_name(&self) -> Option<&str> {
        Some(&self.last_name)
    }
}

/// Owner fields as submitted when creating or editing an owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub telephone: Option<String>,
}

impl OwnerForm {
    /// Validates the form and builds the owner it describes.
    ///
    /// All fields are required and trimmed. The telephone number must be
    /// 1 to 10 digits.
    pub fn into_owner(self, id: Uuid) -> ClinicResult<Owner> {
        let first_name = required("first_name", self.first_name)?;
        let last_name = required("last_name", self.last_name)?;
        let address = required("address", self.address)?;
        let city = required("city", self.city)?;
        let telephone = required("telephone", self.telephone)?;

        if telephone.len() > MAX_TELEPHONE_DIGITS || !telephone.chars().all(|c| c.is_ascii_digit()) {
            return Err(ClinicError::Validation(format!(
                "telephone must be numeric and at most {} digits",
                MAX_TELEPHONE_DIGITS
            )));
        }

        Ok(Owner {
            id,
            first_name,
            last_name,
            address,
            city,
            telephone,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindOwnersQuery {
    /// Last name prefix; empty or missing lists every owner.
    #[serde(default)]
    pub last_name: String,
}

/// An owner together with their pets and each pet's visits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerDetailsResponse {
    #[serde(flatten)]
    pub owner: Owner,
    pub pets: Vec<PetDetails>,
}
