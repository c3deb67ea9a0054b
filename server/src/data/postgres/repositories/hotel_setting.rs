//! Hotel setting repository

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::HotelSettingRow;

const COLUMNS: &str = "id, hotel_id, name, value, created_at, updated_at";

/// List all hotel settings
pub async fn list_hotel_settings(pool: &PgPool) -> Result<Vec<HotelSettingRow>, PostgresError> {
    let rows = sqlx::query_as::<_, HotelSettingRow>(&format!(
        "SELECT {} FROM hotel_settings ORDER BY id",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Get a hotel setting by id
pub async fn get_hotel_setting(
    pool: &PgPool,
    id: i64,
) -> Result<Option<HotelSettingRow>, PostgresError> {
    let row = sqlx::query_as::<_, HotelSettingRow>(&format!(
        "SELECT {} FROM hotel_settings WHERE id = $1",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// List the settings of a hotel, in name order
pub async fn list_settings_for_hotel(
    pool: &PgPool,
    hotel_id: i64,
) -> Result<Vec<HotelSettingRow>, PostgresError> {
    let rows = sqlx::query_as::<_, HotelSettingRow>(&format!(
        "SELECT {} FROM hotel_settings WHERE hotel_id = $1 ORDER BY name",
        COLUMNS
    ))
    .bind(hotel_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a hotel setting
pub async fn create_hotel_setting(
    pool: &PgPool,
    hotel_id: i64,
    name: &str,
    value: &str,
) -> Result<HotelSettingRow, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, HotelSettingRow>(&format!(
        "INSERT INTO hotel_settings (hotel_id, name, value, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $4)
         RETURNING {}",
        COLUMNS
    ))
    .bind(hotel_id)
    .bind(name)
    .bind(value)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Update a hotel setting; returns the updated row, or None if the id is unknown
pub async fn update_hotel_setting(
    pool: &PgPool,
    id: i64,
    hotel_id: i64,
    name: &str,
    value: &str,
) -> Result<Option<HotelSettingRow>, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, HotelSettingRow>(&format!(
        "UPDATE hotel_settings
         SET hotel_id = $2, name = $3, value = $4, updated_at = $5
         WHERE id = $1
         RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .bind(hotel_id)
    .bind(name)
    .bind(value)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete a hotel setting; returns the deleted row, or None if the id is unknown
pub async fn delete_hotel_setting(
    pool: &PgPool,
    id: i64,
) -> Result<Option<HotelSettingRow>, PostgresError> {
    let row = sqlx::query_as::<_, HotelSettingRow>(&format!(
        "DELETE FROM hotel_settings WHERE id = $1 RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
