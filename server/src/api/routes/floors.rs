//! Floor API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::cache_ttl;
use super::rooms::RoomDto;
use crate::api::auth::{ManageFloors, Protected, ViewFloors, ViewRooms};
use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::cache::{CacheKey, CacheService, invalidation};
use crate::data::postgres::PgPool;
use crate::data::postgres::repositories::{floor, room};
use crate::data::types::{FloorRow, RoomRow};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFloorRequest {
    #[validate(range(min = 1, message = "hotel_id must be a positive id"))]
    pub hotel_id: i64,
    #[validate(range(min = -10, max = 500, message = "Floor number out of range"))]
    pub number: i32,
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

/// Floor in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct FloorDto {
    pub id: i64,
    pub hotel_id: i64,
    pub number: i32,
    pub name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<FloorRow> for FloorDto {
    fn from(row: FloorRow) -> Self {
        Self {
            id: row.id,
            hotel_id: row.hotel_id,
            number: row.number,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Shared state for Floor API endpoints
#[derive(Clone)]
pub struct FloorsApiState {
    pub pool: PgPool,
    pub cache: Arc<CacheService>,
}

/// Build Floor API routes
pub fn routes(pool: PgPool, cache: Arc<CacheService>) -> Router<()> {
    let state = FloorsApiState { pool, cache };

    Router::new()
        .route("/", get(list_floors).post(create_floor))
        .route(
            "/{id}",
            get(get_floor).put(update_floor).delete(delete_floor),
        )
        .route("/{id}/rooms", get(list_floor_rooms))
        .with_state(state)
}

fn not_found(id: i64) -> ApiError {
    ApiError::bad_request("FLOOR_NOT_FOUND", format!("Floor not found: {}", id))
}

/// Fetch a floor through the cache, or fail with a 400
async fn require_floor(state: &FloorsApiState, id: i64) -> Result<FloorRow, ApiError> {
    let pool = state.pool.clone();
    let floor: Option<FloorRow> = state
        .cache
        .remember_json(&CacheKey::floor(id), cache_ttl(), move || async move {
            floor::get_floor(&pool, id)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;
    floor.ok_or_else(|| not_found(id))
}

/// List all floors
#[utoipa::path(
    get,
    path = "/api/v1/floors",
    tag = "floors",
    responses(
        (status = 200, description = "List of floors", body = [FloorDto]),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_floors(
    State(state): State<FloorsApiState>,
    _auth: Protected<ViewFloors>,
) -> Result<Json<Vec<FloorDto>>, ApiError> {
    let pool = state.pool.clone();
    let floors: Vec<FloorRow> = state
        .cache
        .remember_json(&CacheKey::all_floors(), cache_ttl(), move || async move {
            floor::list_floors(&pool)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;

    Ok(Json(floors.into_iter().map(FloorDto::from).collect()))
}

/// Get a single floor by id
#[utoipa::path(
    get,
    path = "/api/v1/floors/{id}",
    tag = "floors",
    params(("id" = i64, Path, description = "Floor id")),
    responses(
        (status = 200, description = "Floor details", body = FloorDto),
        (status = 400, description = "Floor not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn get_floor(
    State(state): State<FloorsApiState>,
    _auth: Protected<ViewFloors>,
    IdPath { id }: IdPath,
) -> Result<Json<FloorDto>, ApiError> {
    let floor = require_floor(&state, id).await?;
    Ok(Json(FloorDto::from(floor)))
}

/// Create a floor under a hotel
#[utoipa::path(
    post,
    path = "/api/v1/floors",
    tag = "floors",
    request_body = CreateFloorRequest,
    responses(
        (status = 201, description = "Floor created", body = FloorDto),
        (status = 400, description = "Invalid request or unknown hotel"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn create_floor(
    State(state): State<FloorsApiState>,
    _auth: Protected<ManageFloors>,
    ValidatedJson(body): ValidatedJson<CreateFloorRequest>,
) -> Result<(StatusCode, Json<FloorDto>), ApiError> {
    let floor = floor::create_floor(&state.pool, body.hotel_id, body.number, body.name.as_deref())
        .await
        .map_err(|e| ApiError::from_write(e, "floor"))?;

    state
        .cache
        .invalidate_caches(invalidation::floor_write(floor.id, floor.hotel_id))
        .await;

    Ok((StatusCode::CREATED, Json(FloorDto::from(floor))))
}

/// Update a floor
///
/// Moving the floor to a different hotel refreshes the floor views of
/// both hotels.
#[utoipa::path(
    put,
    path = "/api/v1/floors/{id}",
    tag = "floors",
    params(("id" = i64, Path, description = "Floor id")),
    request_body = CreateFloorRequest,
    responses(
        (status = 200, description = "Floor updated", body = FloorDto),
        (status = 400, description = "Floor not found or unknown hotel"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn update_floor(
    State(state): State<FloorsApiState>,
    _auth: Protected<ManageFloors>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<CreateFloorRequest>,
) -> Result<Json<FloorDto>, ApiError> {
    let before = floor::get_floor(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| not_found(id))?;

    let floor = floor::update_floor(
        &state.pool,
        id,
        body.hotel_id,
        body.number,
        body.name.as_deref(),
    )
    .await
    .map_err(|e| ApiError::from_write(e, "floor"))?
    .ok_or_else(|| not_found(id))?;

    let keys = invalidation::floor_write(id, before.hotel_id)
        .into_iter()
        .chain(invalidation::floor_write(id, floor.hotel_id));
    state.cache.invalidate_caches(keys).await;

    Ok(Json(FloorDto::from(floor)))
}

/// Delete a floor
#[utoipa::path(
    delete,
    path = "/api/v1/floors/{id}",
    tag = "floors",
    params(("id" = i64, Path, description = "Floor id")),
    responses(
        (status = 204, description = "Floor deleted"),
        (status = 400, description = "Floor not found or still referenced"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn delete_floor(
    State(state): State<FloorsApiState>,
    _auth: Protected<ManageFloors>,
    IdPath { id }: IdPath,
) -> Result<StatusCode, ApiError> {
    let deleted = floor::delete_floor(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_write(e, "floor"))?
        .ok_or_else(|| not_found(id))?;

    state
        .cache
        .invalidate_caches(invalidation::floor_write(id, deleted.hotel_id))
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// List the rooms on a floor
#[utoipa::path(
    get,
    path = "/api/v1/floors/{id}/rooms",
    tag = "floors",
    params(("id" = i64, Path, description = "Floor id")),
    responses(
        (status = 200, description = "Rooms on the floor", body = [RoomDto]),
        (status = 400, description = "Floor not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_floor_rooms(
    State(state): State<FloorsApiState>,
    _auth: Protected<ViewRooms>,
    IdPath { id }: IdPath,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    require_floor(&state, id).await?;

    let pool = state.pool.clone();
    let rooms: Vec<RoomRow> = state
        .cache
        .remember_json(&CacheKey::floor_rooms(id), cache_ttl(), move || async move {
            room::list_rooms_for_floor(&pool, id)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;

    Ok(Json(rooms.into_iter().map(RoomDto::from).collect()))
}
