//! # Pet Clinic API
//!
//! The API crate provides the web server for the Pet Clinic scheduling service.
//! It exposes JSON endpoints for owners, pets, vets and visits, including the
//! slot availability lookup and visit booking.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Run the clinic workflows against the repositories
//! - **Middleware**: Map domain errors to HTTP responses
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Persistence sits behind the
//! repository traits of `petclinic-db`, so handlers can be driven by mocks.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement the clinic workflows
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{http::HeaderValue, Router};
use eyre::{Result, WrapErr};
use petclinic_db::repositories::{
    owner::{OwnerRepository, PgOwnerRepository},
    pet::{PetRepository, PgPetRepository},
    vet::{PgVetRepository, VetRepository},
    visit::{PgVisitRepository, VisitRepository},
};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Each repository is held behind its trait so tests can swap in the
/// `petclinic_db::mock` implementations.
///
/// # Example
///
/// ```no_run
/// # async fn example(db_pool: sqlx::PgPool) {
/// use std::sync::Arc;
/// use petclinic_api::{router, ApiState};
///
/// let state = Arc::new(ApiState::from_pool(db_pool));
/// let app = router(state);
/// # }
/// ```
pub struct ApiState {
    pub owners: Arc<dyn OwnerRepository>,
    pub pets: Arc<dyn PetRepository>,
    pub vets: Arc<dyn VetRepository>,
    pub visits: Arc<dyn VisitRepository>,
}

impl ApiState {
    /// Builds the state with Postgres-backed repositories sharing one pool.
    pub fn from_pool(db_pool: PgPool) -> Self {
        Self {
            owners: Arc::new(PgOwnerRepository::new(db_pool.clone())),
            pets: Arc::new(PgPetRepository::new(db_pool.clone())),
            vets: Arc::new(PgVetRepository::new(db_pool.clone())),
            visits: Arc::new(PgVisitRepository::new(db_pool)),
        }
    }
}

/// Builds the application router with every endpoint and the shared state.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Owner management endpoints
        .merge(routes::owner::routes())
        // Pet management endpoints
        .merge(routes::pet::routes())
        // Vet management endpoints
        .merge(routes::vet::routes())
        // Visit booking and availability endpoints
        .merge(routes::visit::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// This function sets up logging, configures routes and middleware, and
/// serves HTTP until the listener fails.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool for database operations
///
/// # Example
///
/// ```no_run
/// # async fn example() -> eyre::Result<()> {
/// use petclinic_api::{config::ApiConfig, start_server};
///
/// let config = ApiConfig::from_env()?;
/// let db_pool = petclinic_db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_pool(db_pool));
    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed = origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .wrap_err_with(|| format!("Invalid CORS origin {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
            .allow_origin(allowed);

        app.layer(cors)
    } else {
        app
    };

    // Add request tracing and timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Pet Clinic listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
