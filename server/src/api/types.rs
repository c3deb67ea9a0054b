//! Shared API types
//!
//! Common types used across all API endpoints, centered on the structured
//! error envelope `{error, code, message}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::data::DataError;
use crate::data::cache::CacheError;
use crate::data::postgres::PostgresError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    Unauthorized { code: String, message: String },
    Conflict { code: String, message: String },
    ServiceUnavailable { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Map a data layer error to an API error, logging the detail and
    /// returning an opaque internal error to the client.
    pub fn from_data(e: DataError) -> Self {
        tracing::error!(error = %e, "Data error");
        Self::Internal {
            message: "Database operation failed".to_string(),
        }
    }

    /// Map a repository error from a write path: constraint violations
    /// become client errors, everything else is internal.
    pub fn from_write(e: PostgresError, entity: &str) -> Self {
        if e.is_unique_violation() {
            return Self::conflict(
                "DUPLICATE",
                format!("A {} with these values already exists", entity),
            );
        }
        if e.is_foreign_key_violation() {
            return Self::bad_request(
                "INVALID_REFERENCE",
                format!(
                    "The {} references a missing entity or is still referenced by another",
                    entity
                ),
            );
        }
        Self::from_data(DataError::Postgres(e))
    }
}

impl From<CacheError> for ApiError {
    fn from(e: CacheError) -> Self {
        tracing::error!(error = %e, "Cache error");
        Self::Internal {
            message: "Cache operation failed".to_string(),
        }
    }
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        Self::from_data(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::Unauthorized { code, message } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", code, message)
            }
            Self::Conflict { code, message } => (StatusCode::CONFLICT, "conflict", code, message),
            Self::ServiceUnavailable { message } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                "SERVICE_UNAVAILABLE".to_string(),
                message,
            ),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let e = ApiError::bad_request("HOTEL_NOT_FOUND", "Hotel not found: 4");
        assert!(matches!(e, ApiError::BadRequest { .. }));

        let e = ApiError::unauthorized("PERMISSION_DENIED", "Unauthorized");
        assert!(matches!(e, ApiError::Unauthorized { .. }));
    }

    #[test]
    fn test_cache_error_maps_to_internal() {
        let e: ApiError = CacheError::Decode("broken".into()).into();
        assert!(matches!(e, ApiError::Internal { .. }));
    }
}
