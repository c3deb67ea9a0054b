//! Floor repository

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::FloorRow;

const COLUMNS: &str = "id, hotel_id, number, name, created_at, updated_at";

/// List all floors
pub async fn list_floors(pool: &PgPool) -> Result<Vec<FloorRow>, PostgresError> {
    let rows = sqlx::query_as::<_, FloorRow>(&format!(
        "SELECT {} FROM floors ORDER BY id",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Get a floor by id
pub async fn get_floor(pool: &PgPool, id: i64) -> Result<Option<FloorRow>, PostgresError> {
    let row = sqlx::query_as::<_, FloorRow>(&format!(
        "SELECT {} FROM floors WHERE id = $1",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// List the floors of a hotel, in floor number order
pub async fn list_floors_for_hotel(
    pool: &PgPool,
    hotel_id: i64,
) -> Result<Vec<FloorRow>, PostgresError> {
    let rows = sqlx::query_as::<_, FloorRow>(&format!(
        "SELECT {} FROM floors WHERE hotel_id = $1 ORDER BY number",
        COLUMNS
    ))
    .bind(hotel_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a floor
pub async fn create_floor(
    pool: &PgPool,
    hotel_id: i64,
    number: i32,
    name: Option<&str>,
) -> Result<FloorRow, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, FloorRow>(&format!(
        "INSERT INTO floors (hotel_id, number, name, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $4)
         RETURNING {}",
        COLUMNS
    ))
    .bind(hotel_id)
    .bind(number)
    .bind(name)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Update a floor; returns the updated row, or None if the id is unknown
pub async fn update_floor(
    pool: &PgPool,
    id: i64,
    hotel_id: i64,
    number: i32,
    name: Option<&str>,
) -> Result<Option<FloorRow>, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, FloorRow>(&format!(
        "UPDATE floors
         SET hotel_id = $2, number = $3, name = $4, updated_at = $5
         WHERE id = $1
         RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .bind(hotel_id)
    .bind(number)
    .bind(name)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete a floor; returns the deleted row, or None if the id is unknown
pub async fn delete_floor(pool: &PgPool, id: i64) -> Result<Option<FloorRow>, PostgresError> {
    let row = sqlx::query_as::<_, FloorRow>(&format!(
        "DELETE FROM floors WHERE id = $1 RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
