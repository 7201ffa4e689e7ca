use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use petclinic_core::{
    errors::ClinicError,
    models::vet::{Specialty, Vet, VetForm},
    person::exists_with_full_name,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

async fn ensure_unique_name(
    state: &ApiState,
    candidate: &Vet,
    original: Option<&Vet>,
) -> Result<(), AppError> {
    let vets = state.vets.find_all().await?;

    if exists_with_full_name(candidate, original, &vets) {
        warn!(
            "Rejected vet {} {}: name already taken",
            candidate.first_name, candidate.last_name
        );
        return Err(ClinicError::Duplicate(format!(
            "A vet named {} {} already exists",
            candidate.first_name, candidate.last_name
        ))
        .into());
    }

    Ok(())
}

pub(crate) async fn load_vet(state: &ApiState, id: Uuid) -> Result<Vet, AppError> {
    state
        .vets
        .find_by_id(id)
        .await?
        .ok_or_else(|| ClinicError::NotFound(format!("Vet with ID {} not found", id)).into())
}

#[axum::debug_handler]
pub async fn list_vets(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Vet>>, AppError> {
    let vets = state.vets.find_all().await?;

    Ok(Json(vets))
}

#[axum::debug_handler]
pub async fn get_vet(
    State(state): State<Arc<ApiState>>,
    Path(vet_id): Path<Uuid>,
) -> Result<Json<Vet>, AppError> {
    let vet = load_vet(&state, vet_id).await?;

    Ok(Json(vet))
}

#[axum::debug_handler]
pub async fn list_specialties(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Specialty>>, AppError> {
    let specialties = state.vets.find_specialties().await?;

    Ok(Json(specialties))
}

#[axum::debug_handler]
pub async fn create_vet(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<VetForm>,
) -> Result<(StatusCode, Json<Vet>), AppError> {
    let catalog = state.vets.find_specialties().await?;
    let vet = payload.into_vet(Uuid::new_v4(), &catalog)?;
    ensure_unique_name(&state, &vet, None).await?;

    let saved = state.vets.save(&vet).await?;
    info!("Created vet {}", saved.id);

    Ok((StatusCode::CREATED, Json(saved)))
}

#[axum::debug_handler]
pub async fn update_vet(
    State(state): State<Arc<ApiState>>,
    Path(vet_id): Path<Uuid>,
    Json(payload): Json<VetForm>,
) -> Result<Json<Vet>, AppError> {
    let original = load_vet(&state, vet_id).await?;

    let catalog = state.vets.find_specialties().await?;
    let vet = payload.into_vet(vet_id, &catalog)?;
    ensure_unique_name(&state, &vet, Some(&original)).await?;

    let saved = state.vets.save(&vet).await?;
    info!("Updated vet {}", saved.id);

    Ok(Json(saved))
}
