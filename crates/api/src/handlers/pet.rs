use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use petclinic_core::{
    errors::ClinicError,
    models::pet::{pet_name_exists, Pet, PetForm, PetType},
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use super::{owner::load_owner, today};
use crate::{middleware::error_handling::AppError, ApiState};

async fn ensure_unique_name(
    state: &ApiState,
    candidate: &Pet,
    original: Option<&Pet>,
) -> Result<(), AppError> {
    let owner_pets = state.pets.find_by_owner_id(candidate.owner_id).await?;

    if pet_name_exists(&candidate.name, original, &owner_pets) {
        warn!(
            "Rejected pet {:?} for owner {}: name already taken",
            candidate.name, candidate.owner_id
        );
        return Err(ClinicError::Duplicate(format!(
            "This owner already has a pet named {}",
            candidate.name
        ))
        .into());
    }

    Ok(())
}

#[axum::debug_handler]
pub async fn list_pet_types(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<PetType>>, AppError> {
    let pet_types = state.pets.find_pet_types().await?;

    Ok(Json(pet_types))
}

#[axum::debug_handler]
pub async fn create_pet(
    State(state): State<Arc<ApiState>>,
    Path(owner_id): Path<Uuid>,
    Json(payload): Json<PetForm>,
) -> Result<(StatusCode, Json<Pet>), AppError> {
    load_owner(&state, owner_id).await?;

    let pet_types = state.pets.find_pet_types().await?;
    let pet = payload.into_pet(Uuid::new_v4(), owner_id, &pet_types, today())?;
    ensure_unique_name(&state, &pet, None).await?;

    let saved = state.pets.save(&pet).await?;
    info!("Added pet {} to owner {}", saved.id, owner_id);

    Ok((StatusCode::CREATED, Json(saved)))
}

#[axum::debug_handler]
pub async fn update_pet(
    State(state): State<Arc<ApiState>>,
    Path((owner_id, pet_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<PetForm>,
) -> Result<Json<Pet>, AppError> {
    // A pet is only reachable through its own owner.
    let original = state
        .pets
        .find_by_id(pet_id)
        .await?
        .filter(|pet| pet.owner_id == owner_id)
        .ok_or_else(|| {
            ClinicError::NotFound(format!("Pet with ID {} not found for owner {}", pet_id, owner_id))
        })?;

    let pet_types = state.pets.find_pet_types().await?;
    let pet = payload.into_pet(pet_id, owner_id, &pet_types, today())?;
    ensure_unique_name(&state, &pet, Some(&original)).await?;

    let saved = state.pets.save(&pet).await?;
    info!("Updated pet {}", saved.id);

    Ok(Json(saved))
}
