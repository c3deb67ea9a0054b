//! Permission API endpoints
//!
//! Read-only: permissions are seeded at migration time.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use super::cache_ttl;
use crate::api::auth::{Protected, ViewPermissions};
use crate::api::types::ApiError;
use crate::data::cache::{CacheKey, CacheService};
use crate::data::postgres::PgPool;
use crate::data::postgres::repositories::permission;
use crate::data::types::PermissionRow;

/// Permission in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionDto {
    pub id: i64,
    pub name: String,
}

impl From<PermissionRow> for PermissionDto {
    fn from(row: PermissionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Shared state for Permission API endpoints
#[derive(Clone)]
pub struct PermissionsApiState {
    pub pool: PgPool,
    pub cache: Arc<CacheService>,
}

/// Build Permission API routes
pub fn routes(pool: PgPool, cache: Arc<CacheService>) -> Router<()> {
    let state = PermissionsApiState { pool, cache };

    Router::new()
        .route("/", get(list_permissions))
        .with_state(state)
}

/// List all permissions
#[utoipa::path(
    get,
    path = "/api/v1/permissions",
    tag = "permissions",
    responses(
        (status = 200, description = "List of permissions", body = [PermissionDto]),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_permissions(
    State(state): State<PermissionsApiState>,
    _auth: Protected<ViewPermissions>,
) -> Result<Json<Vec<PermissionDto>>, ApiError> {
    let pool = state.pool.clone();
    let permissions: Vec<PermissionRow> = state
        .cache
        .remember_json(&CacheKey::all_permissions(), cache_ttl(), move || async move {
            permission::list_permissions(&pool)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;

    Ok(Json(permissions.into_iter().map(PermissionDto::from).collect()))
}
