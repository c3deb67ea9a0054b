//! Hotel repository

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::HotelRow;

const COLUMNS: &str = "id, name, address, city, stars, created_at, updated_at";

/// List all hotels
pub async fn list_hotels(pool: &PgPool) -> Result<Vec<HotelRow>, PostgresError> {
    let rows = sqlx::query_as::<_, HotelRow>(&format!(
        "SELECT {} FROM hotels ORDER BY id",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Get a hotel by id
pub async fn get_hotel(pool: &PgPool, id: i64) -> Result<Option<HotelRow>, PostgresError> {
    let row = sqlx::query_as::<_, HotelRow>(&format!(
        "SELECT {} FROM hotels WHERE id = $1",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Create a hotel
pub async fn create_hotel(
    pool: &PgPool,
    name: &str,
    address: &str,
    city: &str,
    stars: i16,
) -> Result<HotelRow, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, HotelRow>(&format!(
        "INSERT INTO hotels (name, address, city, stars, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $5)
         RETURNING {}",
        COLUMNS
    ))
    .bind(name)
    .bind(address)
    .bind(city)
    .bind(stars)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Update a hotel; returns the updated row, or None if the id is unknown
pub async fn update_hotel(
    pool: &PgPool,
    id: i64,
    name: &str,
    address: &str,
    city: &str,
    stars: i16,
) -> Result<Option<HotelRow>, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, HotelRow>(&format!(
        "UPDATE hotels
         SET name = $2, address = $3, city = $4, stars = $5, updated_at = $6
         WHERE id = $1
         RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .bind(name)
    .bind(address)
    .bind(city)
    .bind(stars)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete a hotel; returns the deleted row, or None if the id is unknown
pub async fn delete_hotel(pool: &PgPool, id: i64) -> Result<Option<HotelRow>, PostgresError> {
    let row = sqlx::query_as::<_, HotelRow>(&format!(
        "DELETE FROM hotels WHERE id = $1 RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
