//! Hotel information API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::cache_ttl;
use crate::api::auth::{ManageHotelInformations, Protected, ViewHotelInformations};
use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::cache::{CacheKey, CacheService, invalidation};
use crate::data::postgres::PgPool;
use crate::data::postgres::repositories::hotel_information;
use crate::data::types::HotelInformationRow;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHotelInformationRequest {
    #[validate(range(min = 1, message = "hotel_id must be a positive id"))]
    pub hotel_id: i64,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,
}

/// Hotel information entry in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct HotelInformationDto {
    pub id: i64,
    pub hotel_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<HotelInformationRow> for HotelInformationDto {
    fn from(row: HotelInformationRow) -> Self {
        Self {
            id: row.id,
            hotel_id: row.hotel_id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Shared state for Hotel information API endpoints
#[derive(Clone)]
pub struct HotelInformationsApiState {
    pub pool: PgPool,
    pub cache: Arc<CacheService>,
}

/// Build Hotel information API routes
pub fn routes(pool: PgPool, cache: Arc<CacheService>) -> Router<()> {
    let state = HotelInformationsApiState { pool, cache };

    Router::new()
        .route(
            "/",
            get(list_hotel_informations).post(create_hotel_information),
        )
        .route(
            "/{id}",
            get(get_hotel_information)
                .put(update_hotel_information)
                .delete(delete_hotel_information),
        )
        .with_state(state)
}

fn not_found(id: i64) -> ApiError {
    ApiError::bad_request(
        "HOTEL_INFORMATION_NOT_FOUND",
        format!("Hotel information not found: {}", id),
    )
}

/// List all hotel information entries
#[utoipa::path(
    get,
    path = "/api/v1/hotel-informations",
    tag = "hotel-informations",
    responses(
        (status = 200, description = "List of hotel information entries", body = [HotelInformationDto]),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_hotel_informations(
    State(state): State<HotelInformationsApiState>,
    _auth: Protected<ViewHotelInformations>,
) -> Result<Json<Vec<HotelInformationDto>>, ApiError> {
    let pool = state.pool.clone();
    let informations: Vec<HotelInformationRow> = state
        .cache
        .remember_json(
            &CacheKey::all_hotel_informations(),
            cache_ttl(),
            move || async move {
                hotel_information::list_hotel_informations(&pool)
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

/// Get a single hotel information entry by id
#[utoipa::path(
    get,
    path = "/api/v1/hotel-informations/{id}",
    tag = "hotel-informations",
    params(("id" = i64, Path, description = "Hotel information id")),
    responses(
        (status = 200, description = "Hotel information details", body = HotelInformationDto),
        (status = 400, description = "Hotel information not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn get_hotel_information(
    State(state): State<HotelInformationsApiState>,
    _auth: Protected<ViewHotelInformations>,
    IdPath { id }: IdPath,
) -> Result<Json<HotelInformationDto>, ApiError> {
    let pool = state.pool.clone();
    let information: Option<HotelInformationRow> = state
        .cache
        .remember_json(
            &CacheKey::hotel_information(id),
            cache_ttl(),
            move || async move {
                hotel_information::get_hotel_information(&pool, id)
                    .await
                    .map_err(|e| ApiError::from_data(e.into()))
            },
        )
        .await?;

    let information = information.ok_or_else(|| not_found(id))?;
    Ok(Json(HotelInformationDto::from(information)))
}

/// Create a hotel information entry
#[utoipa::path(
    post,
    path = "/api/v1/hotel-informations",
    tag = "hotel-informations",
    request_body = CreateHotelInformationRequest,
    responses(
        (status = 201, description = "Hotel information created", body = HotelInformationDto),
        (status = 400, description = "Invalid request or unknown hotel"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn create_hotel_information(
    State(state): State<HotelInformationsApiState>,
    _auth: Protected<ManageHotelInformations>,
    ValidatedJson(body): ValidatedJson<CreateHotelInformationRequest>,
) -> Result<(StatusCode, Json<HotelInformationDto>), ApiError> {
    let information = hotel_information::create_hotel_information(
        &state.pool,
        body.hotel_id,
        &body.title,
        &body.content,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "hotel information"))?;

    state
        .cache
        .invalidate_caches(invalidation::hotel_information_write(
            information.id,
            information.hotel_id,
        ))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(HotelInformationDto::from(information)),
    ))
}

/// Update a hotel information entry
#[utoipa::path(
    put,
    path = "/api/v1/hotel-informations/{id}",
    tag = "hotel-informations",
    params(("id" = i64, Path, description = "Hotel information id")),
    request_body = CreateHotelInformationRequest,
    responses(
        (status = 200, description = "Hotel information updated", body = HotelInformationDto),
        (status = 400, description = "Hotel information not found or unknown hotel"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn update_hotel_information(
    State(state): State<HotelInformationsApiState>,
    _auth: Protected<ManageHotelInformations>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<CreateHotelInformationRequest>,
) -> Result<Json<HotelInformationDto>, ApiError> {
    let before = hotel_information::get_hotel_information(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| not_found(id))?;

    let information = hotel_information::update_hotel_information(
        &state.pool,
        id,
        body.hotel_id,
        &body.title,
        &body.content,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "hotel information"))?
    .ok_or_else(|| not_found(id))?;

    let keys = invalidation::hotel_information_write(id, before.hotel_id)
        .into_iter()
        .chain(invalidation::hotel_information_write(
            id,
            information.hotel_id,
        ));
    state.cache.invalidate_caches(keys).await;

    Ok(Json(HotelInformationDto::from(information)))
}

/// Delete a hotel information entry
#[utoipa::path(
    delete,
    path = "/api/v1/hotel-informations/{id}",
    tag = "hotel-informations",
    params(("id" = i64, Path, description = "Hotel information id")),
    responses(
        (status = 204, description = "Hotel information deleted"),
        (status = 400, description = "Hotel information not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn delete_hotel_information(
    State(state): State<HotelInformationsApiState>,
    _auth: Protected<ManageHotelInformations>,
    IdPath { id }: IdPath,
) -> Result<StatusCode, ApiError> {
    let deleted = hotel_information::delete_hotel_information(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_write(e, "hotel information"))?
        .ok_or_else(|| not_found(id))?;

    state
        .cache
        .invalidate_caches(invalidation::hotel_information_write(id, deleted.hotel_id))
        .await;

    Ok(StatusCode::NO_CONTENT)
}
