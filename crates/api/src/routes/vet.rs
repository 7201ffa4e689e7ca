use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/vets", get(handlers::vet::list_vets))
        .route("/api/vets", post(handlers::vet::create_vet))
        .route("/api/vets/:vet_id", get(handlers::vet::get_vet))
        .route("/api/vets/:vet_id", put(handlers::vet::update_vet))
        .route("/api/specialties", get(handlers::vet::list_specialties))
}
