//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way
//! to represent the failure modes a request can hit, from bad credentials to
//! database errors.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can
//! return `Result<_, AppError>` and have failures rendered as JSON responses
//! of the shape `{"error": <stable code>, "message": <human text>}`. `From`
//! implementations for `sqlx::Error` and `validator::ValidationErrors` allow
//! conversion with the `?` operator. Internal failures are logged server-side
//! and never expose their detail to the client.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failure (HTTP 401): bad credentials, or a missing,
    /// invalid, or expired bearer token. Deliberately coarse so the response
    /// never reveals which check failed.
    Unauthorized(String),
    /// Registration rejected (HTTP 400), e.g. the email is already taken.
    Registration(String),
    /// Failed input validation (HTTP 400).
    Validation(String),
    /// The requested resource does not exist for this user (HTTP 404).
    /// Covers both genuinely missing rows and rows owned by someone else.
    NotFound(String),
    /// An error originating from database operations (HTTP 500).
    Database(String),
    /// Any other unexpected server-side error (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Registration(msg) => write!(f, "Registration failed: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into HTTP responses.
///
/// Every body carries a stable machine-readable `error` code next to the
/// human-readable `message`. Database and internal errors collapse into one
/// generic 500 body; their detail goes to the server log only.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": "unauthorized",
                "message": msg
            })),
            AppError::Registration(msg) => HttpResponse::BadRequest().json(json!({
                "error": "registration_failed",
                "message": msg
            })),
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "error": "validation_error",
                "message": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": "not_found",
                "message": msg
            })),
            AppError::Database(msg) | AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "internal_error",
                    "message": "Internal server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` maps to `AppError::NotFound`; everything else
/// becomes `AppError::Database`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`,
/// preserving the per-field messages.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Invalid email or password".into());
        let response = error.error_response();
        assert_eq!(response.status(), 401);

        let error = AppError::Registration("Email already registered".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        let error = AppError::Validation("title: too long".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        let error = AppError::NotFound("Task not found".into());
        let response = error.error_response();
        assert_eq!(response.status(), 404);

        let error = AppError::Database("connection reset".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);

        let error = AppError::Internal("boom".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        match error {
            AppError::NotFound(_) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
