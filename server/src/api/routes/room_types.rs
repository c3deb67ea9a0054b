//! Room type API endpoints

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
use crate::api::auth::{ManageRoomTypes, Protected, ViewRoomTypes, ViewRooms};
use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::cache::{CacheKey, CacheService, invalidation};
use crate::data::postgres::PgPool;
use crate::data::postgres::repositories::{room, room_type};
use crate::data::types::{RoomRow, RoomTypeRow};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomTypeRequest {
    #[validate(range(min = 1, message = "hotel_id must be a positive id"))]
    pub hotel_id: i64,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 1, max = 20, message = "Capacity must be between 1 and 20"))]
    pub capacity: i32,
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: i64,
}

/// Room type in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomTypeDto {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub price_cents: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<RoomTypeRow> for RoomTypeDto {
    fn from(row: RoomTypeRow) -> Self {
        Self {
            id: row.id,
            hotel_id: row.hotel_id,
            name: row.name,
            description: row.description,
            capacity: row.capacity,
            price_cents: row.price_cents,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Shared state for Room type API endpoints
#[derive(Clone)]
pub struct RoomTypesApiState {
    pub pool: PgPool,
    pub cache: Arc<CacheService>,
}

/// Build Room type API routes
pub fn routes(pool: PgPool, cache: Arc<CacheService>) -> Router<()> {
    let state = RoomTypesApiState { pool, cache };

    Router::new()
        .route("/", get(list_room_types).post(create_room_type))
        .route(
            "/{id}",
            get(get_room_type)
                .put(update_room_type)
                .delete(delete_room_type),
        )
        .route("/{id}/rooms", get(list_room_type_rooms))
        .with_state(state)
}

fn not_found(id: i64) -> ApiError {
    ApiError::bad_request("ROOM_TYPE_NOT_FOUND", format!("Room type not found: {}", id))
}

/// Fetch a room type through the cache, or fail with a 400
async fn require_room_type(state: &RoomTypesApiState, id: i64) -> Result<RoomTypeRow, ApiError> {
    let pool = state.pool.clone();
    let room_type: Option<RoomTypeRow> = state
        .cache
        .remember_json(&CacheKey::room_type(id), cache_ttl(), move || async move {
            room_type::get_room_type(&pool, id)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;
    room_type.ok_or_else(|| not_found(id))
}

/// List all room types
#[utoipa::path(
    get,
    path = "/api/v1/room-types",
    tag = "room-types",
    responses(
        (status = 200, description = "List of room types", body = [RoomTypeDto]),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_room_types(
    State(state): State<RoomTypesApiState>,
    _auth: Protected<ViewRoomTypes>,
) -> Result<Json<Vec<RoomTypeDto>>, ApiError> {
    let pool = state.pool.clone();
    let room_types: Vec<RoomTypeRow> = state
        .cache
        .remember_json(&CacheKey::all_room_types(), cache_ttl(), move || async move {
            room_type::list_room_types(&pool)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;

    Ok(Json(room_types.into_iter().map(RoomTypeDto::from).collect()))
}

/// Get a single room type by id
#[utoipa::path(
    get,
    path = "/api/v1/room-types/{id}",
    tag = "room-types",
    params(("id" = i64, Path, description = "Room type id")),
    responses(
        (status = 200, description = "Room type details", body = RoomTypeDto),
        (status = 400, description = "Room type not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn get_room_type(
    State(state): State<RoomTypesApiState>,
    _auth: Protected<ViewRoomTypes>,
    IdPath { id }: IdPath,
) -> Result<Json<RoomTypeDto>, ApiError> {
    let room_type = require_room_type(&state, id).await?;
    Ok(Json(RoomTypeDto::from(room_type)))
}

/// Create a room type under a hotel
#[utoipa::path(
    post,
    path = "/api/v1/room-types",
    tag = "room-types",
    request_body = CreateRoomTypeRequest,
    responses(
        (status = 201, description = "Room type created", body = RoomTypeDto),
        (status = 400, description = "Invalid request or unknown hotel"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn create_room_type(
    State(state): State<RoomTypesApiState>,
    _auth: Protected<ManageRoomTypes>,
    ValidatedJson(body): ValidatedJson<CreateRoomTypeRequest>,
) -> Result<(StatusCode, Json<RoomTypeDto>), ApiError> {
    let room_type = room_type::create_room_type(
        &state.pool,
        body.hotel_id,
        &body.name,
        body.description.as_deref(),
        body.capacity,
        body.price_cents,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "room type"))?;

    state
        .cache
        .invalidate_caches(invalidation::room_type_write(
            room_type.id,
            room_type.hotel_id,
        ))
        .await;

    Ok((StatusCode::CREATED, Json(RoomTypeDto::from(room_type))))
}

/// Update a room type
#[utoipa::path(
    put,
    path = "/api/v1/room-types/{id}",
    tag = "room-types",
    params(("id" = i64, Path, description = "Room type id")),
    request_body = CreateRoomTypeRequest,
    responses(
        (status = 200, description = "Room type updated", body = RoomTypeDto),
        (status = 400, description = "Room type not found or unknown hotel"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn update_room_type(
    State(state): State<RoomTypesApiState>,
    _auth: Protected<ManageRoomTypes>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<CreateRoomTypeRequest>,
) -> Result<Json<RoomTypeDto>, ApiError> {
    let before = room_type::get_room_type(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| not_found(id))?;

    let room_type = room_type::update_room_type(
        &state.pool,
        id,
        body.hotel_id,
        &body.name,
        body.description.as_deref(),
        body.capacity,
        body.price_cents,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "room type"))?
    .ok_or_else(|| not_found(id))?;

    let keys = invalidation::room_type_write(id, before.hotel_id)
        .into_iter()
        .chain(invalidation::room_type_write(id, room_type.hotel_id));
    state.cache.invalidate_caches(keys).await;

    Ok(Json(RoomTypeDto::from(room_type)))
}

/// Delete a room type
#[utoipa::path(
    delete,
    path = "/api/v1/room-types/{id}",
    tag = "room-types",
    params(("id" = i64, Path, description = "Room type id")),
    responses(
        (status = 204, description = "Room type deleted"),
        (status = 400, description = "Room type not found or still referenced"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn delete_room_type(
    State(state): State<RoomTypesApiState>,
    _auth: Protected<ManageRoomTypes>,
    IdPath { id }: IdPath,
) -> Result<StatusCode, ApiError> {
    let deleted = room_type::delete_room_type(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_write(e, "room type"))?
        .ok_or_else(|| not_found(id))?;

    state
        .cache
        .invalidate_caches(invalidation::room_type_write(id, deleted.hotel_id))
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// List the rooms of a room type
#[utoipa::path(
    get,
    path = "/api/v1/room-types/{id}/rooms",
    tag = "room-types",
    params(("id" = i64, Path, description = "Room type id")),
    responses(
        (status = 200, description = "Rooms of the room type", body = [RoomDto]),
        (status = 400, description = "Room type not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_room_type_rooms(
    State(state): State<RoomTypesApiState>,
    _auth: Protected<ViewRooms>,
    IdPath { id }: IdPath,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    require_room_type(&state, id).await?;

    let pool = state.pool.clone();
    let rooms: Vec<RoomRow> = state
        .cache
        .remember_json(
            &CacheKey::room_type_rooms(id),
            cache_ttl(),
            move || async move {
                room::list_rooms_for_room_type(&pool, id)
                    .await
                    .map_err(|e| ApiError::from_data(e.into()))
            },
        )
        .await?;

    Ok(Json(rooms.into_iter().map(RoomDto::from).collect()))
}
