use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/owners", get(handlers::owner::find_owners))
        .route("/api/owners", post(handlers::owner::create_owner))
        .route("/api/owners/:owner_id", get(handlers::owner::get_owner))
        .route("/api/owners/:owner_id", put(handlers::owner::update_owner))
}
