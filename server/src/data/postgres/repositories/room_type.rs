//! Room type repository

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::RoomTypeRow;

const COLUMNS: &str =
    "id, hotel_id, name, description, capacity, price_cents, created_at, updated_at";

/// List all room types
pub async fn list_room_types(pool: &PgPool) -> Result<Vec<RoomTypeRow>, PostgresError> {
    let rows = sqlx::query_as::<_, RoomTypeRow>(&format!(
        "SELECT {} FROM room_types ORDER BY id",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Get a room type by id
pub async fn get_room_type(pool: &PgPool, id: i64) -> Result<Option<RoomTypeRow>, PostgresError> {
    let row = sqlx::query_as::<_, RoomTypeRow>(&format!(
        "SELECT {} FROM room_types WHERE id = $1",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// List the room types of a hotel
pub async fn list_room_types_for_hotel(
    pool: &PgPool,
    hotel_id: i64,
) -> Result<Vec<RoomTypeRow>, PostgresError> {
    let rows = sqlx::query_as::<_, RoomTypeRow>(&format!(
        "SELECT {} FROM room_types WHERE hotel_id = $1 ORDER BY name",
        COLUMNS
    ))
    .bind(hotel_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a room type
pub async fn create_room_type(
    pool: &PgPool,
    hotel_id: i64,
    name: &str,
    description: Option<&str>,
    capacity: i32,
    price_cents: i64,
) -> Result<RoomTypeRow, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, RoomTypeRow>(&format!(
        "INSERT INTO room_types
             (hotel_id, name, description, capacity, price_cents, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $6)
         RETURNING {}",
        COLUMNS
    ))
    .bind(hotel_id)
    .bind(name)
    .bind(description)
    .bind(capacity)
    .bind(price_cents)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Update a room type; returns the updated row, or None if the id is unknown
pub async fn update_room_type(
    pool: &PgPool,
    id: i64,
    hotel_id: i64,
    name: &str,
    description: Option<&str>,
    capacity: i32,
    price_cents: i64,
) -> Result<Option<RoomTypeRow>, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, RoomTypeRow>(&format!(
        "UPDATE room_types
         SET hotel_id = $2, name = $3, description = $4, capacity = $5,
             price_cents = $6, updated_at = $7
         WHERE id = $1
         RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .bind(hotel_id)
    .bind(name)
    .bind(description)
    .bind(capacity)
    .bind(price_cents)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete a room type; returns the deleted row, or None if the id is unknown
pub async fn delete_room_type(
    pool: &PgPool,
    id: i64,
) -> Result<Option<RoomTypeRow>, PostgresError> {
    let row = sqlx::query_as::<_, RoomTypeRow>(&format!(
        "DELETE FROM room_types WHERE id = $1 RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
