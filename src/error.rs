//!
//! # Custom Error Handling
//!
//! This module defines the error type `AppError` shared by the persistence gateway,
//! the use cases and the HTTP layer. Use cases return domain errors untransformed;
//! only the `ResponseError` implementation decides how each kind is shown to a client.
//!
//! `From` implementations exist for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` so `?` works everywhere.

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError, ResponseError},
    http::header,
    http::StatusCode,
    HttpResponse,
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Convenience alias used by repositories and services.
pub type AppResult<T> = Result<T, AppError>;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid credentials (HTTP 401).
    Unauthorized(String),
    /// The request could not be decoded: bad JSON, missing field, bad path segment (HTTP 400).
    BadRequest(String),
    /// A referenced list, task or user does not exist (HTTP 404).
    NotFound(String),
    /// The resource already exists, e.g. a duplicate username (HTTP 409).
    Conflict(String),
    /// Unexpected server-side failure not related to storage (HTTP 500).
    InternalServerError(String),
    /// Failure of the underlying storage (HTTP 500).
    /// The message is logged but never shown to the client.
    DatabaseError(String),
    /// Well-formed input that breaks a domain rule, including a status or priority
    /// outside the allowed values (HTTP 422 Unprocessable Entity).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into JSON `HttpResponse`s of the form `{"error": "..."}`.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            AppError::Unauthorized(msg) => builder
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(json!({ "error": msg })),
            AppError::DatabaseError(msg) => {
                log::error!("storage failure: {}", msg);
                builder.json(json!({ "error": "Internal storage error" }))
            }
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                builder.json(json!({ "error": msg }))
            }
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::ValidationError(msg) => builder.json(json!({ "error": msg })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` becomes `NotFound`; everything else is a storage failure.
/// Constraint violations that carry domain meaning are mapped by the repository itself.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// Error handler for `web::PathConfig` so extractor failures share the `{"error": ...}` body.
pub fn extractor_error<E: fmt::Display>(err: E) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Error handler for `web::JsonConfig`. An unknown enum value is a validation failure;
/// anything else that fails to decode is a bad request.
pub fn json_error(err: JsonPayloadError) -> actix_web::Error {
    match &err {
        JsonPayloadError::Deserialize(inner) if is_unknown_variant(inner) => {
            AppError::ValidationError(inner.to_string()).into()
        }
        _ => extractor_error(err),
    }
}

/// Error handler for `web::QueryConfig`, same split as [`json_error`].
pub fn query_error(err: QueryPayloadError) -> actix_web::Error {
    match &err {
        QueryPayloadError::Deserialize(inner) if is_unknown_variant(inner) => {
            AppError::ValidationError(inner.to_string()).into()
        }
        _ => extractor_error(err),
    }
}

fn is_unknown_variant<E: fmt::Display>(err: &E) -> bool {
    err.to_string().starts_with("unknown variant")
}
