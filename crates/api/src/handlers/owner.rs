use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use petclinic_core::{
    errors::ClinicError,
    models::{
        owner::{FindOwnersQuery, Owner, OwnerDetailsResponse, OwnerForm},
        pet::PetDetails,
        visit::VisitResponse,
    },
    person::exists_with_full_name,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::today;
use crate::{middleware::error_handling::AppError, ApiState};

/// Rejects `candidate` when another owner already has the same full name.
async fn ensure_unique_name(
    state: &ApiState,
    candidate: &Owner,
    original: Option<&Owner>,
) -> Result<(), AppError> {
    let namesakes = state.owners.find_by_last_name(&candidate.last_name).await?;

    if exists_with_full_name(candidate, original, &namesakes) {
        warn!(
            "Rejected owner {} {}: name already taken",
            candidate.first_name, candidate.last_name
        );
        return Err(ClinicError::Duplicate(format!(
            "An owner named {} {} already exists",
            candidate.first_name, candidate.last_name
        ))
        .into());
    }

    Ok(())
}

pub(crate) async fn load_owner(state: &ApiState, id: Uuid) -> Result<Owner, AppError> {
    state
        .owners
        .find_by_id(id)
        .await?
        .ok_or_else(|| ClinicError::NotFound(format!("Owner with ID {} not found", id)).into())
}

#[axum::debug_handler]
pub async fn create_owner(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<OwnerForm>,
) -> Result<(StatusCode, Json<Owner>), AppError> {
    let owner = payload.into_owner(Uuid::new_v4())?;
    ensure_unique_name(&state, &owner, None).await?;

    let saved = state.owners.save(&owner).await?;
    info!("Created owner {}", saved.id);

    Ok((StatusCode::CREATED, Json(saved)))
}

#[axum::debug_handler]
pub async fn update_owner(
    State(state): State<Arc<ApiState>>,
    Path(owner_id): Path<Uuid>,
    Json(payload): Json<OwnerForm>,
) -> Result<Json<Owner>, AppError> {
    let original = load_owner(&state, owner_id).await?;

    let owner = payload.into_owner(owner_id)?;
    ensure_unique_name(&state, &owner, Some(&original)).await?;

    let saved = state.owners.save(&owner).await?;
    info!("Updated owner {}", saved.id);

    Ok(Json(saved))
}

#[axum::debug_handler]
pub async fn find_owners(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FindOwnersQuery>,
) -> Result<Json<Vec<Owner>>, AppError> {
    let owners = state.owners.find_by_last_name(query.last_name.trim()).await?;
    debug!("Found {} owners matching {:?}", owners.len(), query.last_name);

    Ok(Json(owners))
}

/// Owner with every pet and each pet's visits.
#[axum::debug_handler]
pub async fn get_owner(
    State(state): State<Arc<ApiState>>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<OwnerDetailsResponse>, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let today = today();

    let mut pets = Vec::new();
    for pet in state.pets.find_by_owner_id(owner_id).await? {
        let visits = state
            .visits
            .find_by_pet_id(pet.id)
            .await?
            .into_iter()
            .map(|visit| VisitResponse::new(visit, today))
            .collect();

        pets.push(PetDetails { pet, visits });
    }

    Ok(Json(OwnerDetailsResponse { owner, pets }))
}
