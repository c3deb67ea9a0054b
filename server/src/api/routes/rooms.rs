//! Room API endpoints
//!
//! Rooms hang off two parents (floor and room type), so every mutation
//! refreshes both related-collection views.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::cache_ttl;
use crate::api::auth::{ManageRooms, Protected, ViewRooms};
use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::cache::{CacheKey, CacheService, invalidation};
use crate::data::postgres::PgPool;
use crate::data::postgres::repositories::room;
use crate::data::types::RoomRow;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    #[validate(range(min = 1, message = "floor_id must be a positive id"))]
    pub floor_id: i64,
    #[validate(range(min = 1, message = "room_type_id must be a positive id"))]
    pub room_type_id: i64,
    #[validate(length(min = 1, max = 20, message = "Number must be 1-20 characters"))]
    pub number: String,
}

/// Room in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDto {
    pub id: i64,
    pub floor_id: i64,
    pub room_type_id: i64,
    pub number: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<RoomRow> for RoomDto {
    fn from(row: RoomRow) -> Self {
        Self {
            id: row.id,
            floor_id: row.floor_id,
            room_type_id: row.room_type_id,
            number: row.number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Shared state for Room API endpoints
#[derive(Clone)]
pub struct RoomsApiState {
    pub pool: PgPool,
    pub cache: Arc<CacheService>,
}

/// Build Room API routes
pub fn routes(pool: PgPool, cache: Arc<CacheService>) -> Router<()> {
    let state = RoomsApiState { pool, cache };

    Router::new()
        .route("/", get(list_rooms).post(create_room))
        .route("/{id}", get(get_room).put(update_room).delete(delete_room))
        .with_state(state)
}

fn not_found(id: i64) -> ApiError {
    ApiError::bad_request("ROOM_NOT_FOUND", format!("Room not found: {}", id))
}

/// List all rooms
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "rooms",
    responses(
        (status = 200, description = "List of rooms", body = [RoomDto]),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_rooms(
    State(state): State<RoomsApiState>,
    _auth: Protected<ViewRooms>,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    let pool = state.pool.clone();
    let rooms: Vec<RoomRow> = state
        .cache
        .remember_json(&CacheKey::all_rooms(), cache_ttl(), move || async move {
            room::list_rooms(&pool)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;

    Ok(Json(rooms.into_iter().map(RoomDto::from).collect()))
}

/// Get a single room by id
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    tag = "rooms",
    params(("id" = i64, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room details", body = RoomDto),
        (status = 400, description = "Room not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn get_room(
    State(state): State<RoomsApiState>,
    _auth: Protected<ViewRooms>,
    IdPath { id }: IdPath,
) -> Result<Json<RoomDto>, ApiError> {
    let pool = state.pool.clone();
    let room: Option<RoomRow> = state
        .cache
        .remember_json(&CacheKey::room(id), cache_ttl(), move || async move {
            room::get_room(&pool, id)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;

    let room = room.ok_or_else(|| not_found(id))?;
    Ok(Json(RoomDto::from(room)))
}

/// Create a room
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = RoomDto),
        (status = 400, description = "Invalid request or unknown floor/room type"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn create_room(
    State(state): State<RoomsApiState>,
    _auth: Protected<ManageRooms>,
    ValidatedJson(body): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomDto>), ApiError> {
    let room = room::create_room(&state.pool, body.floor_id, body.room_type_id, &body.number)
        .await
        .map_err(|e| ApiError::from_write(e, "room"))?;

    state
        .cache
        .invalidate_caches(invalidation::room_write(
            room.id,
            room.floor_id,
            room.room_type_id,
        ))
        .await;

    Ok((StatusCode::CREATED, Json(RoomDto::from(room))))
}

/// Update a room
///
/// Moving the room to a different floor or room type refreshes the
/// related views on both sides.
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    tag = "rooms",
    params(("id" = i64, Path, description = "Room id")),
    request_body = CreateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = RoomDto),
        (status = 400, description = "Room not found or unknown floor/room type"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn update_room(
    State(state): State<RoomsApiState>,
    _auth: Protected<ManageRooms>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<CreateRoomRequest>,
) -> Result<Json<RoomDto>, ApiError> {
    let before = room::get_room(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| not_found(id))?;

    let room = room::update_room(
        &state.pool,
        id,
        body.floor_id,
        body.room_type_id,
        &body.number,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "room"))?
    .ok_or_else(|| not_found(id))?;

    let keys = invalidation::room_write(id, before.floor_id, before.room_type_id)
        .into_iter()
        .chain(invalidation::room_write(
            id,
            room.floor_id,
            room.room_type_id,
        ));
    state.cache.invalidate_caches(keys).await;

    Ok(Json(RoomDto::from(room)))
}

/// Delete a room
#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    tag = "rooms",
    params(("id" = i64, Path, description = "Room id")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 400, description = "Room not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn delete_room(
    State(state): State<RoomsApiState>,
    _auth: Protected<ManageRooms>,
    IdPath { id }: IdPath,
) -> Result<StatusCode, ApiError> {
    let deleted = room::delete_room(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_write(e, "room"))?
        .ok_or_else(|| not_found(id))?;

    state
        .cache
        .invalidate_caches(invalidation::room_write(
            id,
            deleted.floor_id,
            deleted.room_type_id,
        ))
        .await;

    Ok(StatusCode::NO_CONTENT)
}
