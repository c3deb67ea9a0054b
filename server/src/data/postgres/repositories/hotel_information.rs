//! Hotel information repository

use sqlx::PgPool;

use crate::data::postgres::PostgresError;
use crate::data::types::HotelInformationRow;

const COLUMNS: &str = "id, hotel_id, title, content, created_at, updated_at";

/// List all hotel information entries
pub async fn list_hotel_informations(
    pool: &PgPool,
) -> Result<Vec<HotelInformationRow>, PostgresError> {
    let rows = sqlx::query_as::<_, HotelInformationRow>(&format!(
        "SELECT {} FROM hotel_informations ORDER BY id",
        COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Get a hotel information entry by id
pub async fn get_hotel_information(
    pool: &PgPool,
    id: i64,
) -> Result<Option<HotelInformationRow>, PostgresError> {
    let row = sqlx::query_as::<_, HotelInformationRow>(&format!(
        "SELECT {} FROM hotel_informations WHERE id = $1",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// List the information entries of a hotel
pub async fn list_informations_for_hotel(
    pool: &PgPool,
    hotel_id: i64,
) -> Result<Vec<HotelInformationRow>, PostgresError> {
    let rows = sqlx::query_as::<_, HotelInformationRow>(&format!(
        "SELECT {} FROM hotel_informations WHERE hotel_id = $1 ORDER BY id",
        COLUMNS
    ))
    .bind(hotel_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a hotel information entry
pub async fn create_hotel_information(
    pool: &PgPool,
    hotel_id: i64,
    title: &str,
    content: &str,
) -> Result<HotelInformationRow, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, HotelInformationRow>(&format!(
        "INSERT INTO hotel_informations (hotel_id, title, content, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $4)
         RETURNING {}",
        COLUMNS
    ))
    .bind(hotel_id)
    .bind(title)
    .bind(content)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Update a hotel information entry; returns the updated row, or None if
/// the id is unknown
pub async fn update_hotel_information(
    pool: &PgPool,
    id: i64,
    hotel_id: i64,
    title: &str,
    content: &str,
) -> Result<Option<HotelInformationRow>, PostgresError> {
    let now = chrono::Utc::now().timestamp();
    let row = sqlx::query_as::<_, HotelInformationRow>(&format!(
        "UPDATE hotel_informations
         SET hotel_id = $2, title = $3, content = $4, updated_at = $5
         WHERE id = $1
         RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .bind(hotel_id)
    .bind(title)
    .bind(content)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Delete a hotel information entry; returns the deleted row, or None if
/// the id is unknown
pub async fn delete_hotel_information(
    pool: &PgPool,
    id: i64,
) -> Result<Option<HotelInformationRow>, PostgresError> {
    let row = sqlx::query_as::<_, HotelInformationRow>(&format!(
        "DELETE FROM hotel_informations WHERE id = $1 RETURNING {}",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
