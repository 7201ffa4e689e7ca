use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/pets/:pet_id/visits", get(handlers::visit::list_visits))
        .route("/api/pets/:pet_id/visits", post(handlers::visit::book_visit))
        .route(
            "/api/vets/:vet_id/availability",
            get(handlers::visit::get_availability),
        )
        .route(
            "/api/owners/:owner_id/visits/:visit_id",
            delete(handlers::visit::cancel_visit),
        )
}
