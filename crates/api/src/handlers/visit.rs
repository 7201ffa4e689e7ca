//! Visit booking, availability and cancellation.
//!
//! A booking passes three gates before it is stored: the pet and vet must
//! exist, the day must be a weekday after today, and the vet's slot must still
//! be free. The database's unique slot index settles two requests racing for
//! the same slot.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use petclinic_core::{
    booking::{check_booking, is_day_unavailable, BookingRejection},
    errors::ClinicError,
    models::{
        pet::Pet,
        visit::{AvailabilityQuery, AvailabilityResponse, BookVisitRequest, VisitResponse},
    },
    slots::available_slots,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{today, vet::load_vet};
use crate::{middleware::error_handling::AppError, ApiState};

async fn load_pet(state: &ApiState, id: Uuid) -> Result<Pet, AppError> {
    state
        .pets
        .find_by_id(id)
        .await?
        .ok_or_else(|| ClinicError::NotFound(format!("Pet with ID {} not found", id)).into())
}

#[axum::debug_handler]
pub async fn list_visits(
    State(state): State<Arc<ApiState>>,
    Path(pet_id): Path<Uuid>,
) -> Result<Json<Vec<VisitResponse>>, AppError> {
    load_pet(&state, pet_id).await?;

    let today = today();
    let visits = state
        .visits
        .find_by_pet_id(pet_id)
        .await?
        .into_iter()
        .map(|visit| VisitResponse::new(visit, today))
        .collect();

    Ok(Json(visits))
}

/// Free slots of a vet on the requested day.
///
/// Unavailable days answer with an empty list and `day_unavailable` set,
/// without consulting the bookings.
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(vet_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    load_vet(&state, vet_id).await?;

    let date = query.date;
    let day_unavailable = is_day_unavailable(date, today());
    let slots = if day_unavailable {
        Vec::new()
    } else {
        let booked = state.visits.find_booked_slots(vet_id, date).await?;
        available_slots(booked)
    };
    debug!("Vet {} has {} free slots on {}", vet_id, slots.len(), date);

    Ok(Json(AvailabilityResponse {
        vet_id,
        date,
        day_unavailable,
        slots,
    }))
}

#[axum::debug_handler]
pub async fn book_visit(
    State(state): State<Arc<ApiState>>,
    Path(pet_id): Path<Uuid>,
    Json(payload): Json<BookVisitRequest>,
) -> Result<(StatusCode, Json<VisitResponse>), AppError> {
    load_pet(&state, pet_id).await?;

    let visit = payload.into_visit(Uuid::new_v4(), pet_id)?;
    load_vet(&state, visit.vet_id).await?;

    let today = today();
    // Checked ahead of check_booking so an unavailable day never queries the bookings.
    if is_day_unavailable(visit.date, today) {
        warn!("Rejected visit for pet {} on {}: day unavailable", pet_id, visit.date);
        return Err(BookingRejection::UnavailableDay.into());
    }

    let booked = state.visits.find_booked_slots(visit.vet_id, visit.date).await?;
    if let Err(rejection) = check_booking(visit.date, visit.time_slot, today, booked) {
        warn!("Rejected visit for pet {}: {}", pet_id, rejection);
        return Err(rejection.into());
    }

    let saved = state.visits.save(&visit).await?;
    info!(
        "Booked visit {} with vet {} on {} slot {}",
        saved.id, saved.vet_id, saved.date, saved.time_slot
    );

    Ok((StatusCode::CREATED, Json(VisitResponse::new(saved, today))))
}

/// Cancels a visit of one of the owner's pets.
#[axum::debug_handler]
pub async fn cancel_visit(
    State(state): State<Arc<ApiState>>,
    Path((owner_id, visit_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    let not_found =
        || ClinicError::NotFound(format!("Visit with ID {} not found for owner {}", visit_id, owner_id));

    let visit = state.visits.find_by_id(visit_id).await?.ok_or_else(not_found)?;
    let pet = load_pet(&state, visit.pet_id).await?;
    if pet.owner_id != owner_id {
        return Err(not_found().into());
    }

    state.visits.delete_by_id(visit_id).await?;
    info!("Cancelled visit {} for owner {}", visit_id, owner_id);

    Ok(StatusCode::NO_CONTENT)
}
