//! User administration API endpoints
//!
//! Role assignment changes only affect tokens issued afterwards; a
//! signed-in user keeps the permission snapshot in their current access
//! token until it expires.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::auth::{ManageUsers, Protected};
use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::postgres::PgPool;
use crate::data::postgres::repositories::user;
use crate::data::types::UserRow;
use crate::utils::crypto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(max = 100, message = "Display name must be at most 100 characters"))]
    pub display_name: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetUserRolesRequest {
    /// Full replacement set of role ids
    #[validate(length(max = 32, message = "Too many roles"))]
    pub role_ids: Vec<i64>,
}

/// User in API responses (never carries the password hash)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<UserRow> for UserDto {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Shared state for User API endpoints
#[derive(Clone)]
pub struct UsersApiState {
    pub pool: PgPool,
}

/// Build User API routes
pub fn routes(pool: PgPool) -> Router<()> {
    let state = UsersApiState { pool };

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}/roles", put(set_user_roles).get(get_user_roles))
        .with_state(state)
}

fn not_found(id: i64) -> ApiError {
    ApiError::bad_request("USER_NOT_FOUND", format!("User not found: {}", id))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = [UserDto]),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_users(
    State(state): State<UsersApiState>,
    _auth: Protected<ManageUsers>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = user::list_users(&state.pool)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 401, description = "Missing permission"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<UsersApiState>,
    _auth: Protected<ManageUsers>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let password_hash = crypto::hash_password(&body.password)
        .map_err(|e| ApiError::internal(format!("Password hashing failed: {}", e)))?;

    let user = user::create_user(
        &state.pool,
        &body.email,
        body.display_name.as_deref(),
        &password_hash,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "user"))?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Get a user's role ids
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/roles",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Role ids of the user"),
        (status = 400, description = "User not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn get_user_roles(
    State(state): State<UsersApiState>,
    _auth: Protected<ManageUsers>,
    IdPath { id }: IdPath,
) -> Result<Json<Vec<i64>>, ApiError> {
    user::get_user(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| not_found(id))?;

    let role_ids = user::user_role_ids(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?;
    Ok(Json(role_ids))
}

/// Replace a user's role set
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/roles",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = SetUserRolesRequest,
    responses(
        (status = 200, description = "Role set replaced"),
        (status = 400, description = "User not found or unknown role id"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn set_user_roles(
    State(state): State<UsersApiState>,
    _auth: Protected<ManageUsers>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<SetUserRolesRequest>,
) -> Result<Json<Vec<i64>>, ApiError> {
    user::get_user(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| not_found(id))?;

    user::set_user_roles(&state.pool, id, &body.role_ids)
        .await
        .map_err(|e| ApiError::from_write(e, "user role"))?;

    let role_ids = user::user_role_ids(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?;
    Ok(Json(role_ids))
}
