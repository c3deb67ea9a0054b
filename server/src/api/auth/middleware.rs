//! Authentication middleware

use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::gate::AuthorizationGate;
use super::jwt::{AccessClaims, JwtError};
use super::manager::AuthManager;

/// Authentication error response
#[derive(Debug)]
pub struct AuthError {
    pub status: StatusCode,
    pub error: &'static str,
    pub code: &'static str,
    pub message: String,
}

impl AuthError {
    pub fn required() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: "unauthorized",
            code: "AUTH_REQUIRED",
            message: "Authentication required".to_string(),
        }
    }

    pub fn expired() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: "unauthorized",
            code: "TOKEN_EXPIRED",
            message: "Access token has expired".to_string(),
        }
    }

    pub fn invalid() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: "unauthorized",
            code: "TOKEN_INVALID",
            message: "Invalid access token".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.error,
            "code": self.code,
            "message": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

/// Request-scoped authentication context
///
/// Carries the verified claims for the duration of one request. Inserted
/// by [`require_auth`], consumed by the `Protected` guard extractors; the
/// embedded permission snapshot is never persisted or mutated.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub claims: AccessClaims,
}

/// Shared auth state for middleware
#[derive(Clone)]
pub struct AuthState {
    pub auth_manager: Arc<AuthManager>,
    pub gate: Arc<AuthorizationGate>,
}

/// Authentication middleware
///
/// Validates the bearer access token and injects into request extensions:
/// - `AuthContext` - verified claims with the permission snapshot
/// - `Arc<AuthorizationGate>` - gate handle for the permission guards
pub async fn require_auth(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(AuthError::required)?;

    let claims = state.auth_manager.validate_access(token).map_err(|e| match e {
        JwtError::Expired => AuthError::expired(),
        _ => AuthError::invalid(),
    })?;

    request.extensions_mut().insert(AuthContext { claims });
    request.extensions_mut().insert(state.gate.clone());

    Ok(next.run(request).await)
}
