//! Hotel setting API endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::cache_ttl;
use crate::api::auth::{ManageHotelSettings, Protected, ViewHotelSettings};
use crate::api::extractors::{IdPath, ValidatedJson};
use crate::api::types::ApiError;
use crate::data::cache::{CacheKey, CacheService, invalidation};
use crate::data::postgres::PgPool;
use crate::data::postgres::repositories::hotel_setting;
use crate::data::types::HotelSettingRow;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHotelSettingRequest {
    #[validate(range(min = 1, message = "hotel_id must be a positive id"))]
    pub hotel_id: i64,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    pub value: String,
}

/// Hotel setting in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct HotelSettingDto {
    pub id: i64,
    pub hotel_id: i64,
    pub name: String,
    pub value: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<HotelSettingRow> for HotelSettingDto {
    fn from(row: HotelSettingRow) -> Self {
        Self {
            id: row.id,
            hotel_id: row.hotel_id,
            name: row.name,
            value: row.value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Shared state for Hotel setting API endpoints
#[derive(Clone)]
pub struct HotelSettingsApiState {
    pub pool: PgPool,
    pub cache: Arc<CacheService>,
}

/// Build Hotel setting API routes
pub fn routes(pool: PgPool, cache: Arc<CacheService>) -> Router<()> {
    let state = HotelSettingsApiState { pool, cache };

    Router::new()
        .route("/", get(list_hotel_settings).post(create_hotel_setting))
        .route(
            "/{id}",
            get(get_hotel_setting)
                .put(update_hotel_setting)
                .delete(delete_hotel_setting),
        )
        .with_state(state)
}

fn not_found(id: i64) -> ApiError {
    ApiError::bad_request(
        "HOTEL_SETTING_NOT_FOUND",
        format!("Hotel setting not found: {}", id),
    )
}

/// List all hotel settings
#[utoipa::path(
    get,
    path = "/api/v1/hotel-settings",
    tag = "hotel-settings",
    responses(
        (status = 200, description = "List of hotel settings", body = [HotelSettingDto]),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn list_hotel_settings(
    State(state): State<HotelSettingsApiState>,
    _auth: Protected<ViewHotelSettings>,
) -> Result<Json<Vec<HotelSettingDto>>, ApiError> {
    let pool = state.pool.clone();
    let settings: Vec<HotelSettingRow> = state
        .cache
        .remember_json(
            &CacheKey::all_hotel_settings(),
            cache_ttl(),
            move || async move {
                hotel_setting::list_hotel_settings(&pool)
                    .await
                    .map_err(|e| ApiError::from_data(e.into()))
            },
        )
        .await?;

    Ok(Json(settings.into_iter().map(HotelSettingDto::from).collect()))
}

/// Get a single hotel setting by id
#[utoipa::path(
    get,
    path = "/api/v1/hotel-settings/{id}",
    tag = "hotel-settings",
    params(("id" = i64, Path, description = "Hotel setting id")),
    responses(
        (status = 200, description = "Hotel setting details", body = HotelSettingDto),
        (status = 400, description = "Hotel setting not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn get_hotel_setting(
    State(state): State<HotelSettingsApiState>,
    _auth: Protected<ViewHotelSettings>,
    IdPath { id }: IdPath,
) -> Result<Json<HotelSettingDto>, ApiError> {
    let pool = state.pool.clone();
    let setting: Option<HotelSettingRow> = state
        .cache
        .remember_json(&CacheKey::hotel_setting(id), cache_ttl(), move || async move {
            hotel_setting::get_hotel_setting(&pool, id)
                .await
                .map_err(|e| ApiError::from_data(e.into()))
        })
        .await?;

    let setting = setting.ok_or_else(|| not_found(id))?;
    Ok(Json(HotelSettingDto::from(setting)))
}

/// Create a hotel setting
#[utoipa::path(
    post,
    path = "/api/v1/hotel-settings",
    tag = "hotel-settings",
    request_body = CreateHotelSettingRequest,
    responses(
        (status = 201, description = "Hotel setting created", body = HotelSettingDto),
        (status = 400, description = "Invalid request or unknown hotel"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn create_hotel_setting(
    State(state): State<HotelSettingsApiState>,
    _auth: Protected<ManageHotelSettings>,
    ValidatedJson(body): ValidatedJson<CreateHotelSettingRequest>,
) -> Result<(StatusCode, Json<HotelSettingDto>), ApiError> {
    let setting =
        hotel_setting::create_hotel_setting(&state.pool, body.hotel_id, &body.name, &body.value)
            .await
            .map_err(|e| ApiError::from_write(e, "hotel setting"))?;

    state
        .cache
        .invalidate_caches(invalidation::hotel_setting_write(
            setting.id,
            setting.hotel_id,
        ))
        .await;

    Ok((StatusCode::CREATED, Json(HotelSettingDto::from(setting))))
}

/// Update a hotel setting
#[utoipa::path(
    put,
    path = "/api/v1/hotel-settings/{id}",
    tag = "hotel-settings",
    params(("id" = i64, Path, description = "Hotel setting id")),
    request_body = CreateHotelSettingRequest,
    responses(
        (status = 200, description = "Hotel setting updated", body = HotelSettingDto),
        (status = 400, description = "Hotel setting not found or unknown hotel"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn update_hotel_setting(
    State(state): State<HotelSettingsApiState>,
    _auth: Protected<ManageHotelSettings>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<CreateHotelSettingRequest>,
) -> Result<Json<HotelSettingDto>, ApiError> {
    let before = hotel_setting::get_hotel_setting(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_data(e.into()))?
        .ok_or_else(|| not_found(id))?;

    let setting = hotel_setting::update_hotel_setting(
        &state.pool,
        id,
        body.hotel_id,
        &body.name,
        &body.value,
    )
    .await
    .map_err(|e| ApiError::from_write(e, "hotel setting"))?
    .ok_or_else(|| not_found(id))?;

    let keys = invalidation::hotel_setting_write(id, before.hotel_id)
        .into_iter()
        .chain(invalidation::hotel_setting_write(id, setting.hotel_id));
    state.cache.invalidate_caches(keys).await;

    Ok(Json(HotelSettingDto::from(setting)))
}

/// Delete a hotel setting
#[utoipa::path(
    delete,
    path = "/api/v1/hotel-settings/{id}",
    tag = "hotel-settings",
    params(("id" = i64, Path, description = "Hotel setting id")),
    responses(
        (status = 204, description = "Hotel setting deleted"),
        (status = 400, description = "Hotel setting not found"),
        (status = 401, description = "Missing permission")
    )
)]
pub async fn delete_hotel_setting(
    State(state): State<HotelSettingsApiState>,
    _auth: Protected<ManageHotelSettings>,
    IdPath { id }: IdPath,
) -> Result<StatusCode, ApiError> {
    let deleted = hotel_setting::delete_hotel_setting(&state.pool, id)
        .await
        .map_err(|e| ApiError::from_write(e, "hotel setting"))?
        .ok_or_else(|| not_found(id))?;

    state
        .cache
        .invalidate_caches(invalidation::hotel_setting_write(id, deleted.hotel_id))
        .await;

    Ok(StatusCode::NO_CONTENT)
}
