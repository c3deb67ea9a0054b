//! Hotel API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::cache_ttl;
use crate::api::auth::{ManageHotels, Protected, ViewFloors, ViewHotelInformations,
    ViewHotelSettings, ViewHotels, ViewRoomTypes};
use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::cache::{CacheKey, CacheService, invalidation};
use crate::data::postgres::PgPool;
use crate::data::postgres::repositories::{floor, hotel, hotel_information, hotel_setting,
    room_type};
use crate::data::types::{FloorRow, HotelInformationRow, HotelRow, HotelSettingRow, RoomTypeRow};

use super::floors::FloorDto;
use super::hotel_informations::HotelInformationDto;
use super::hotel_settings::HotelSettingDto;
use super::room_types::RoomTypeDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHotelRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address cannot be empty"))]
    pub address: String,
    #[validate(length(min = 1, message = "City cannot be empty"))]
    pub city: String,
    #[validate(range(min = 0, max = 5, message = "Stars must be between 0 and 5"))]
    pub stars: i16,
}

/// Hotel in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct HotelDto {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub stars: i16,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<HotelRow> for HotelDto {
    fn from(row: HotelRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            stars: row.stars,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Shared state for Hotel API endpoints
#[derive(Clone)]
pub struct HotelsApiState {
    pub pool: PgPool,
    pub cache: Arc<CacheService>,
}

/// Build Hotel API routes
pub fn routes(pool: PgPool, cache: Arc<CacheService>) -> Router<()> {
    let state = HotelsApiState { pool, cache };

    Router::new()
        .route("/", get(list_hotels).post(create_hotel))
        .route(
            "/{id}",
            get(get_hotel).put(update_hotel).delete(delete_hotel),
        )
        .route("/{id}/floors", get(list_hotel_floors))
        .route("/{id}/room-types", get(list_hotel_room_types))
        .route("/{id}/settings", get(list_settings_for_hotel))
        .route("/{id}/informations", get(list_informations_for_hotel))
        .with_state(state)
}

/// Fetch a hotel through the cache, or fail with a 400
async fn require_hotel(state: &HotelsApiState, id: i64) -> Result<HotelRow, ApiError> {
    let pool = state.pool.clone();
    let hotel: Option<HotelRow> = state
        .cache
        .remember_json(&CacheKey::hotel(id), cache_ttl(), move || async move {
            hotel::get_hotel(&pool, id)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;
    hotel.ok_or_else(|| {
        ApiError::bad_request("HOTEL_NOT_FOUND", format!("Hotel not found: {}", id))
    })
}

/// List all hotels
#[utoipa::path(
    get,
    path = "/api/v1/hotels",
    tag = "hotels",
    responses(
        (status = 200, description = "List of hotels", body = [HotelDto]),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_hotels(
    State(state): State<HotelsApiState>,
    _auth: Protected<ViewHotels>,
) -> Result<Json<Vec<HotelDto>>, ApiError> {
    let pool = state.pool.clone();
    let hotels: Vec<HotelRow> = state
        .cache
        .remember_json(&CacheKey::all_hotels(), cache_ttl(), move || async move {
            hotel::list_hotels(&pool)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;

    Ok(Json(hotels.into_iter().map(HotelDto::from).collect()))
}

/// Get a single hotel by id
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Hotel details", body = HotelDto),
        (status = 400, description = "Hotel not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn get_hotel(
    State(state): State<HotelsApiState>,
    _auth: Protected<ViewHotels>,
    IdPath { id }: IdPath,
) -> Result<Json<HotelDto>, ApiError> {
    let hotel = require_hotel(&state, id).await?;
    Ok(Json(HotelDto::from(hotel)))
}

/// Create a hotel
#[utoipa::path(
    post,
    path = "/api/v1/hotels",
    tag = "hotels",
    request_body = CreateHotelRequest,
    responses(
        (status = 201, description = "Hotel created", body = HotelDto),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn create_hotel(
    State(state): State<HotelsApiState>,
    _auth: Protected<ManageHotels>,
    ValidatedJson(body): ValidatedJson<CreateHotelRequest>,
) -> Result<(StatusCode, Json<HotelDto>), ApiError> {
    let hotel = hotel::create_hotel(&state.pool, &body.name, &body.address, &body.city, body.stars)
        .await
        .map_err(|e| ApiError::from_write(e, "hotel"))?;

    state
        .cache
        .invalidate_caches(invalidation::hotel_write(hotel.id))
        .await;

    Ok((StatusCode::CREATED, Json(HotelDto::from(hotel))))
}

/// Update a hotel
#[utoipa::path(
    put,
    path = "/api/v1/hotels/{id}",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel id")),
    request_body = CreateHotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = HotelDto),
        (status = 400, description = "Hotel not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn update_hotel(
    State(state): State<HotelsApiState>,
    _auth: Protected<ManageHotels>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<CreateHotelRequest>,
) -> Result<Json<HotelDto>, ApiError> {
    let hotel = hotel::update_hotel(
        &state.pool,
        id,
        &body.name,
        &body.address,
        &body.city,
        body.stars,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "hotel"))?
    .ok_or_else(|| {
        ApiError::bad_request("HOTEL_NOT_FOUND", format!("Hotel not found: {}", id))
    })?;

    state
        .cache
        .invalidate_caches(invalidation::hotel_write(id))
        .await;

    Ok(Json(HotelDto::from(hotel)))
}

/// Delete a hotel
#[utoipa::path(
    delete,
    path = "/api/v1/hotels/{id}",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel id")),
    responses(
        (status = 204, description = "Hotel deleted"),
        (status = 400, description = "Hotel not found or still referenced"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn delete_hotel(
    State(state): State<HotelsApiState>,
    _auth: Protected<ManageHotels>,
    IdPath { id }: IdPath,
) -> Result<StatusCode, ApiError> {
    let deleted = hotel::delete_hotel(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_write(e, "hotel"))?;

    if deleted.is_none() {
        return Err(ApiError::bad_request(
            "HOTEL_NOT_FOUND",
            format!("Hotel not found: {}", id),
        ));
    }

    state
        .cache
        .invalidate_caches(invalidation::hotel_write(id))
        .await;

    Ok(StatusCode::NO_CONTENT)
}

/// List the floors of a hotel
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/floors",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Floors of the hotel", body = [FloorDto]),
        (status = 400, description = "Hotel not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_hotel_floors(
    State(state): State<HotelsApiState>,
    _auth: Protected<ViewFloors>,
    IdPath { id }: IdPath,
) -> Result<Json<Vec<FloorDto>>, ApiError> {
    require_hotel(&state, id).await?;

    let pool = state.pool.clone();
    let floors: Vec<FloorRow> = state
        .cache
        .remember_json(&CacheKey::hotel_floors(id), cache_ttl(), move || async move {
            floor::list_floors_for_hotel(&pool, id)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;

    Ok(Json(floors.into_iter().map(FloorDto::from).collect()))
}

/// List the room types of a hotel
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/room-types",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Room types of the hotel", body = [RoomTypeDto]),
        (status = 400, description = "Hotel not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_hotel_room_types(
    State(state): State<HotelsApiState>,
    _auth: Protected<ViewRoomTypes>,
    IdPath { id }: IdPath,
) -> Result<Json<Vec<RoomTypeDto>>, ApiError> {
    require_hotel(&state, id).await?;

    let pool = state.pool.clone();
    let room_types: Vec<RoomTypeRow> = state
        .cache
        .remember_json(
            &CacheKey::hotel_room_types(id),
            cache_ttl(),
            move || async move {
                room_type::list_room_types_for_hotel(&pool, id)
                    .await
                    .map_err(|e| ApiError::from_data(e.into()))
            },
        )
        .await?;

    Ok(Json(room_types.into_iter().map(RoomTypeDto::from).collect()))
}

/// List the settings of a hotel
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/settings",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Settings of the hotel", body = [HotelSettingDto]),
        (status = 400, description = "Hotel not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_settings_for_hotel(
    State(state): State<HotelsApiState>,
    _auth: Protected<ViewHotelSettings>,
    IdPath { id }: IdPath,
) -> Result<Json<Vec<HotelSettingDto>>, ApiError> {
    require_hotel(&state, id).await?;

    let pool = state.pool.clone();
    let settings: Vec<HotelSettingRow> = state
        .cache
        .remember_json(
            &CacheKey::hotel_hotel_settings(id),
            cache_ttl(),
            move || async move {
                hotel_setting::list_settings_for_hotel(&pool, id)
                    .await
                    .map_err(|e| ApiError::from_data(e.into()))
            },
        )
        .await?;

    Ok(Json(settings.into_iter().map(HotelSettingDto::from).collect()))
}

/// List the information entries of a hotel
#[utoipa::path(
    get,
    path = "/api/v1/hotels/{id}/informations",
    tag = "hotels",
    params(("id" = i64, Path, description = "Hotel id")),
    responses(
        (status = 200, description = "Information entries of the hotel", body = [HotelInformationDto]),
        (status = 400, description = "Hotel not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_informations_for_hotel(
    State(state): State<HotelsApiState>,
    _auth: Protected<ViewHotelInformations>,
    IdPath { id }: IdPath,
) -> Result<Json<Vec<HotelInformationDto>>, ApiError> {
    require_hotel(&state, id).await?;

    let pool = state.pool.clone();
    let informations: Vec<HotelInformationRow> = state
        .cache
        .remember_json(
            &CacheKey::hotel_hotel_informations(id),
            cache_ttl(),
            move || async move {
                hotel_information::list_informations_for_hotel(&pool, id)
                    .await
                    .map_err(|e| ApiError::from_data(e.into()))
            },
        )
        .await?;

    Ok(Json(
        informations
            .into_iter()
            .map(HotelInformationDto::from)
            .collect(),
    ))
}
