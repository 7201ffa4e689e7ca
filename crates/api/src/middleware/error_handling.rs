//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Pet Clinic API.
//! It maps domain errors to HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way.
//!
//! Rejected input (unknown ids, missing fields, duplicate names, unavailable
//! booking days) maps to 4xx responses. Repository failures map to 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use petclinic_core::{booking::BookingRejection, errors::ClinicError};
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `ClinicError` values and implements `IntoResponse`, so
/// handlers can return `Result<Json<T>, AppError>` and use `?` on both domain
/// and repository results.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use petclinic_api::middleware::error_handling::AppError;
/// use petclinic_core::errors::ClinicError;
///
/// async fn handler(name: Option<String>) -> Result<Json<String>, AppError> {
///     let name = name.ok_or_else(|| ClinicError::Validation("name is required".to_string()))?;
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ClinicError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::Validation(_) => StatusCode::BAD_REQUEST,
            ClinicError::Duplicate(_) => StatusCode::CONFLICT,
            ClinicError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClinicError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

impl From<ClinicError> for AppError {
    fn from(err: ClinicError) -> Self {
        AppError(err)
    }
}

impl From<BookingRejection> for AppError {
    fn from(rejection: BookingRejection) -> Self {
        match rejection {
            BookingRejection::UnavailableDay => {
                AppError(ClinicError::Validation(rejection.to_string()))
            }
            BookingRejection::SlotTaken(_) => AppError(ClinicError::Duplicate(rejection.to_string())),
        }
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Repository errors become `ClinicError::Database`, except a
/// `BookingRejection` raised by the store itself, which keeps its 4xx meaning.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        match err.downcast_ref::<BookingRejection>() {
            Some(rejection) => AppError::from(*rejection),
            None => AppError(ClinicError::Database(err)),
        }
    }
}
