use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/pet-types", get(handlers::pet::list_pet_types))
        .route("/api/owners/:owner_id/pets", post(handlers::pet::create_pet))
        .route(
            "/api/owners/:owner_id/pets/:pet_id",
            put(handlers::pet::update_pet),
        )
}
