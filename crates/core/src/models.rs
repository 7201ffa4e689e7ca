pub mod owner;
pub mod pet;
pub mod time_slot;
pub mod vet;
pub mod visit;

use crate::errors::{ClinicError, ClinicResult};

/// Trims a submitted form value and rejects it when missing or blank.
pub(crate) fn required(field: &str, value: Option<String>) -> ClinicResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ClinicError::Validation(format!("{} is required", field)))
}
