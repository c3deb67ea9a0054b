//! Room repository

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::RoomRow;

const COLUMNS: &str = "id, floor_id, room_type_id, number, created_at, updated_at";

/// List all rooms
pub async fn list_rooms(pool: &PgPool) -> Result<Vec<RoomRow>, PostgresError> {
    let rows = sqlx::query_as::<_, RoomRow>(&format!(
        "SELECT {} FROM rooms ORDER BY id",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Get a room by id
pub async fn get_room(pool: &PgPool, id: i64) -> Result<Option<RoomRow>, PostgresError> {
    let row = sqlx::query_as::<_, RoomRow>(&format!(
        "SELECT {} FROM rooms WHERE id = $1",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// List the rooms on a floor, in room number order
pub async fn list_rooms_for_floor(
    pool: &PgPool,
    floor_id: i64,
) -> Result<Vec<RoomRow>, PostgresError> {
    let rows = sqlx::query_as::<_, RoomRow>(&format!(
        "SELECT {} FROM rooms WHERE floor_id = $1 ORDER BY number",
        COLUMNS
    ))
    .bind(floor_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// List the rooms of a room type
pub async fn list_rooms_for_room_type(
    pool: &PgPool,
    room_type_id: i64,
) -> Result<Vec<RoomRow>, PostgresError> {
    let rows = sqlx::query_as::<_, RoomRow>(&format!(
        "SELECT {} FROM rooms WHERE room_type_id = $1 ORDER BY number",
        COLUMNS
    ))
    .bind(room_type_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a room
pub async fn create_room(
    pool: &PgPool,
    floor_id: i64,
    room_type_id: i64,
    number: &str,
) -> Result<RoomRow, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, RoomRow>(&format!(
        "INSERT INTO rooms (floor_id, room_type_id, number, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $4)
         RETURNING {}",
        COLUMNS
    ))
    .bind(floor_id)
    .bind(room_type_id)
    .bind(number)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Update a room; returns the updated row, or None if the id is unknown
pub async fn update_room(
    pool: &PgPool,
    id: i64,
    floor_id: i64,
    room_type_id: i64,
    number: &str,
) -> Result<Option<RoomRow>, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, RoomRow>(&format!(
        "UPDATE rooms
         SET floor_id = $2, room_type_id = $3, number = $4, updated_at = $5
         WHERE id = $1
         RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .bind(floor_id)
    .bind(room_type_id)
    .bind(number)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete a room; returns the deleted row, or None if the id is unknown
pub async fn delete_room(pool: &PgPool, id: i64) -> Result<Option<RoomRow>, PostgresError> {
    let row = sqlx::query_as::<_, RoomRow>(&format!(
        "DELETE FROM rooms WHERE id = $1 RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
