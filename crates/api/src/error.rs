//! HTTP error type and its JSON envelope.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pulse_core::error::CoreError;
use serde::Serialize;

/// Message returned for every 500; the real cause is logged instead.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Error returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request the handler never got to see (bad JSON body).
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Failure half of the response envelope.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    code: &'static str,
}

impl AppError {
    /// HTTP status, machine-readable code, and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => database_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = ErrorBody {
            status: "error",
            message,
            code,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn core_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Map a sqlx error onto the envelope.
///
/// Only `uq_`-named unique violations (409) and foreign-key violations
/// (400) are surfaced. Everything else becomes an opaque 500 and the driver
/// text goes to the log.
fn database_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        match (db_err.code().as_deref(), db_err.constraint()) {
            (Some("23505"), Some(constraint)) if constraint.starts_with("uq_") => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
            (Some("23503"), constraint) => {
                tracing::warn!(error = %db_err, ?constraint, "Foreign key violation");
                return (
                    StatusCode::BAD_REQUEST,
                    "BAD_REQUEST",
                    "Referenced record does not exist".to_string(),
                );
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Database error");
    internal()
}
