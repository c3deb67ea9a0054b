//! Role API endpoints
//!
//! Role-permission edge mutations invalidate the role's flattened
//! permission view, so tokens issued afterwards see the change at once.
//! Tokens already issued keep their snapshot until they expire.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::cache_ttl;
use crate::api::auth::{ManageRoles, Protected, ViewRoles};
use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::cache::{CacheKey, CacheService, invalidation};
use crate::data::postgres::PgPool;
use crate::data::postgres::repositories::role;
use crate::data::types::RoleRow;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetRolePermissionsRequest {
    /// Full replacement set of permission ids
    #[validate(length(max = 64, message = "Too many permissions"))]
    pub permission_ids: Vec<i64>,
}

/// Role in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleDto {
    pub id: i64,
    pub name: String,
}

impl From<RoleRow> for RoleDto {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Shared state for Role API endpoints
#[derive(Clone)]
pub struct RolesApiState {
    pub pool: PgPool,
    pub cache: Arc<CacheService>,
}

/// Build Role API routes
pub fn routes(pool: PgPool, cache: Arc<CacheService>) -> Router<()> {
    let state = RolesApiState { pool, cache };

    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route("/{id}", get(get_role).put(update_role).delete(delete_role))
        .route(
            "/{id}/permissions",
            get(get_role_permissions).put(set_role_permissions),
        )
        .with_state(state)
}

fn not_found(id: i64) -> ApiError {
    ApiError::bad_request("ROLE_NOT_FOUND", format!("Role not found: {}", id))
}

/// List all roles
#[utoipa::path(
    get,
    path = "/api/v1/roles",
    tag = "roles",
    responses(
        (status = 200, description = "List of roles", body = [RoleDto]),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_roles(
    State(state): State<RolesApiState>,
    _auth: Protected<ViewRoles>,
) -> Result<Json<Vec<RoleDto>>, ApiError> {
    let roles = role::list_roles(&state.pool)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?;
    Ok(Json(roles.into_iter().map(RoleDto::from).collect()))
}

/// Get a single role by id
#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role details", body = RoleDto),
        (status = 400, description = "Role not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn get_role(
    State(state): State<RolesApiState>,
    _auth: Protected<ViewRoles>,
    IdPath { id }: IdPath,
) -> Result<Json<RoleDto>, ApiError> {
    let role = role::get_role(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(RoleDto::from(role)))
}

/// Create a role
#[utoipa::path(
    post,
    path = "/api/v1/roles",
    tag = "roles",
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = RoleDto),
        (status = 401, description = "Missing permission"),
        (status = 409, description = "Role name already exists")
    )
)]
pub async fn create_role(
    State(state): State<RolesApiState>,
    _auth: Protected<ManageRoles>,
    ValidatedJson(body): ValidatedJson<CreateRoleRequest>,
) -> Result<(StatusCode, Json<RoleDto>), ApiError> {
    let role = role::create_role(&state.pool, &body.name)
        .await
        .map_err(|e| ApiError::from_write(e, "role"))?;
    Ok((StatusCode::CREATED, Json(RoleDto::from(role))))
}

/// Rename a role
#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role id")),
    request_body = CreateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = RoleDto),
        (status = 400, description = "Role not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn update_role(
    State(state): State<RolesApiState>,
    _auth: Protected<ManageRoles>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<CreateRoleRequest>,
) -> Result<Json<RoleDto>, ApiError> {
    let role = role::update_role(&state.pool, id, &body.name)
        .await
        .map_err(|e| ApiError::from_write(e, "role"))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(RoleDto::from(role)))
}

/// Delete a role
///
/// Cascades the role's permission edges, so the flattened view is
/// invalidated alongside.
#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    tag = "roles",
    params(("id" = i64, Path, description = "Role id")),
    responses(
        (status = 204, description = "Role deleted"),
        (status = 400, description = "Role not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn delete_role(
    State(state): State<RolesApiState>,
    _auth: Protected<ManageRoles>,
    IdPath { id }: IdPath,
) -> Result<StatusCode, ApiError> {
    role::delete_role(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_write(e, "role"))?
        .ok_or_else(|| not_found(id))?;

    state
        .cache
        .invalidate_caches(invalidation::role_permissions_write(id))
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// Get a role's flattened permission ids
#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}/permissions",
    tag = "roles",
    params(("id" = i64, Path, description = "Role id")),
    responses(
        (status = 200, description = "Permission ids of the role"),
        (status = 400, description = "Role not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn get_role_permissions(
    State(state): State<RolesApiState>,
    _auth: Protected<ViewRoles>,
    IdPath { id }: IdPath,
) -> Result<Json<Vec<i64>>, ApiError> {
    role::get_role(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| not_found(id))?;

    let pool = state.pool.clone();
    let ids: Vec<i64> = state
        .cache
        .remember_json(
            &CacheKey::role_permissions_flattened(id),
            cache_ttl(),
            move || async move {
                role::role_permission_ids(&pool, id)
                    .await
                    .map_err(|e| ApiError::from_data(e.into()))
            },
        )
        .await?;

    Ok(Json(ids))
}

/// Replace a role's permission set
#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}/permissions",
    tag = "roles",
    params(("id" = i64, Path, description = "Role id")),
    request_body = SetRolePermissionsRequest,
    responses(
        (status = 200, description = "Permission set replaced"),
        (status = 400, description = "Role not found or unknown permission id"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn set_role_permissions(
    State(state): State<RolesApiState>,
    _auth: Protected<ManageRoles>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<SetRolePermissionsRequest>,
) -> Result<Json<Vec<i64>>, ApiError> {
    role::get_role(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| not_found(id))?;

    role::set_role_permissions(&state.pool, id, &body.permission_ids)
        .await
        .map_err(|e| ApiError::from_write(e, "role permission"))?;

    state
        .cache
        .invalidate_caches(invalidation::role_permissions_write(id))
        .await;

    let ids = role::role_permission_ids(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?;
    Ok(Json(ids))
}
