//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the FieldSync
//! API. It maps domain-specific errors to appropriate HTTP status codes and
//! JSON error responses, ensuring a consistent error handling experience
//! across the entire API.
//!
//! All model-level failures are recoverable by the caller: a missing
//! technician can be created, invalid input can be corrected and resubmitted,
//! and a failed save leaves the previously loaded state intact so the user
//! can retry.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fieldsync_core::errors::FieldError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `FieldError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub FieldError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status
/// code and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            FieldError::NotFound(_) => StatusCode::NOT_FOUND,
            FieldError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            FieldError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            FieldError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

/// Automatic conversion from FieldError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, FieldError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<FieldError> for AppError {
    fn from(err: FieldError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// Repository functions return `eyre::Result`; this wraps their failures in
/// the `Storage` variant so `?` works directly in handlers.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(FieldError::Storage(err))
    }
}

/// Maps a FieldError to an HTTP response
///
/// Convenience used by tests and by code outside the handler return path.
pub fn map_error(err: FieldError) -> Response {
    AppError(err).into_response()
}
