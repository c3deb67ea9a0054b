//! Authentication API endpoints
//!
//! Issues short-lived access tokens carrying the caller's permission
//! snapshot, plus a longer-lived refresh token confined to an HTTP-only
//! cookie scoped to the refresh endpoint. The refresh flow reads the
//! token only from that cookie, never from the Authorization header.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::auth::{AuthManager, PermissionResolver};
use crate::api::extractors::ValidatedJson;
use crate::api::types::ApiError;
use crate::core::constants::{
    ACCESS_TOKEN_TTL_MINUTES, REFRESH_COOKIE_NAME, REFRESH_COOKIE_PATH, REFRESH_TOKEN_TTL_HOURS,
};
use crate::data::postgres::PgPool;
use crate::data::postgres::repositories::user;
use crate::utils::crypto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Auth routes state
#[derive(Clone)]
pub struct AuthRoutesState {
    pub auth_manager: Arc<AuthManager>,
    pub resolver: Arc<PermissionResolver>,
    pub pool: PgPool,
}

/// Create auth routes
pub fn routes(
    auth_manager: Arc<AuthManager>,
    resolver: Arc<PermissionResolver>,
    pool: PgPool,
) -> Router {
    let state = AuthRoutesState {
        auth_manager,
        resolver,
        pool,
    };

    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .with_state(state)
}

fn invalid_credentials() -> ApiError {
    // Uniform response for unknown email and wrong password alike
    ApiError::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
}

fn build_refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE_NAME, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path(REFRESH_COOKIE_PATH)
        .max_age(time::Duration::hours(REFRESH_TOKEN_TTL_HOURS))
        .build()
}

fn token_response(access_token: String) -> TokenResponse {
    TokenResponse {
        access_token,
        token_type: "Bearer",
        expires_in: ACCESS_TOKEN_TTL_MINUTES * 60,
    }
}

/// Issue tokens for a user: the access token embeds the permission
/// snapshot computed right now.
async fn issue_tokens(
    state: &AuthRoutesState,
    user_id: i64,
) -> Result<(String, String), ApiError> {
    let permissions = state
        .resolver
        .permission_ids_for_user(user_id)
        .await
        .map_err(ApiError::from_data)?;

    let access = state
        .auth_manager
        .issue_access_token(user_id, permissions)
        .map_err(|e| ApiError::internal(format!("Token issuance failed: {}", e)))?;
    let refresh = state
        .auth_manager
        .issue_refresh_token(user_id)
        .map_err(|e| ApiError::internal(format!("Token issuance failed: {}", e)))?;

    Ok((access, refresh))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Tokens issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthRoutesState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let user = user::get_user_by_email(&state.pool, &request.email)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(invalid_credentials)?;

    if !crypto::verify_password(&request.password, &user.password_hash) {
        return Err(invalid_credentials());
    }

    let (access, refresh) = issue_tokens(&state, user.id).await?;

    tracing::debug!(user_id = user.id, "User logged in");
    Ok((
        jar.add(build_refresh_cookie(refresh)),
        Json(token_response(access)),
    ))
}

/// Exchange the refresh cookie for a fresh token pair
///
/// The permission snapshot is recomputed here, so role changes take
/// effect on refresh even though outstanding access tokens are untouched.
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "auth",
    responses(
        (status = 200, description = "Tokens rotated", body = TokenResponse),
        (status = 401, description = "Missing or invalid refresh token")
    )
)]
pub async fn refresh(
    State(state): State<AuthRoutesState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<TokenResponse>), ApiError> {
    let cookie = jar
        .get(REFRESH_COOKIE_NAME)
        .ok_or_else(|| ApiError::unauthorized("AUTH_REQUIRED", "Refresh token required"))?;

    let claims = state
        .auth_manager
        .validate_refresh(cookie.value())
        .map_err(|_| ApiError::unauthorized("TOKEN_INVALID", "Invalid refresh token"))?;

    // The user must still exist
    user::get_user(&state.pool, claims.sub)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| ApiError::unauthorized("TOKEN_INVALID", "Invalid refresh token"))?;

    let (access, refresh) = issue_tokens(&state, claims.sub).await?;

    Ok((
        jar.add(build_refresh_cookie(refresh)),
        Json(token_response(access)),
    ))
}

/// Log out - clear the refresh cookie
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out")
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let cookie = Cookie::build((REFRESH_COOKIE_NAME, ""))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path(REFRESH_COOKIE_PATH)
        .max_age(time::Duration::seconds(0))
        .build();

    (jar.remove(cookie), StatusCode::OK)
}
